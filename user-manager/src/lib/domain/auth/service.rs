use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::errors::AuthError;
use crate::auth::models::JabberId;
use crate::auth::models::Principal;
use crate::auth::models::RoleSet;
use crate::auth::ports::AuthManagerPort;
use crate::auth::ports::CredentialStore;
use crate::config::Config;

/// Mechanism dispatch over an injected credential store.
///
/// Holds no mutable state; a single instance is shared by every concurrent
/// authentication attempt. Role sets are re-read from the store on every
/// call, trading latency for freshness.
pub struct AuthManager<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
    config: Arc<Config>,
}

impl<S> AuthManager<S>
where
    S: CredentialStore,
{
    /// Create a new manager over the given store and configuration.
    pub fn new(store: Arc<S>, config: Arc<Config>) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[async_trait]
impl<S> AuthManagerPort for AuthManager<S>
where
    S: CredentialStore,
{
    async fn verify_plain(
        &self,
        identifier: &JabberId,
        password: &str,
    ) -> Result<Principal, AuthError> {
        match self.store.check_credentials(identifier, password).await? {
            Some(roles) => {
                tracing::debug!(user = %identifier, mechanism = "PLAIN", "Authentication succeeded");
                Ok(Principal::new(identifier.clone())
                    .mark_authenticated()
                    .with_roles(roles))
            }
            None => {
                // Wrong password and unknown account must stay
                // indistinguishable to the caller.
                tracing::debug!(user = %identifier, mechanism = "PLAIN", "Authentication failed");
                Ok(Principal::new(identifier.clone()))
            }
        }
    }

    async fn verify_digest(
        &self,
        identifier: &JabberId,
        stream_id: &str,
        presented_digest: &str,
    ) -> Result<Principal, AuthError> {
        if !self.config.allows_non_sasl_digest() {
            tracing::warn!(
                user = %identifier,
                "Digest authentication attempted while nonsasldigest is disabled"
            );
            return Ok(Principal::new(identifier.clone()));
        }

        let secret = match self.store.fetch_password(identifier).await? {
            Some(secret) => secret,
            None => {
                tracing::debug!(user = %identifier, mechanism = "DIGEST", "Authentication failed");
                return Ok(Principal::new(identifier.clone()));
            }
        };

        let expected = sasl::digest::stream_digest(stream_id, &secret);
        if !sasl::digest::digests_match(presented_digest, &expected) {
            tracing::debug!(user = %identifier, mechanism = "DIGEST", "Authentication failed");
            return Ok(Principal::new(identifier.clone()));
        }

        let roles = self
            .store
            .fetch_roles(identifier)
            .await?
            .unwrap_or_default();
        tracing::debug!(user = %identifier, mechanism = "DIGEST", "Authentication succeeded");
        Ok(Principal::new(identifier.clone())
            .mark_authenticated()
            .with_roles(roles))
    }

    async fn precomputed_secret_hash(
        &self,
        identifier: &JabberId,
        realm: &str,
    ) -> Result<String, AuthError> {
        let secret = self
            .store
            .fetch_password(identifier)
            .await?
            .ok_or_else(|| AuthError::UnknownUser(identifier.to_string()))?;

        Ok(sasl::digest::user_realm_secret_hash(
            identifier.local(),
            realm,
            &secret,
        ))
    }

    async fn resolve_principal(
        &self,
        identifier: &JabberId,
        authenticated: bool,
    ) -> Result<Principal, AuthError> {
        if !authenticated {
            return Ok(Principal::new(identifier.clone()));
        }

        // Trust was established by an earlier handshake step; only the role
        // lookup remains.
        let roles = self
            .store
            .fetch_roles(identifier)
            .await?
            .unwrap_or_default();
        Ok(Principal::new(identifier.clone())
            .mark_authenticated()
            .with_roles(roles))
    }

    async fn security_roles(&self) -> Result<RoleSet, AuthError> {
        Ok(self.store.list_all_roles().await?)
    }

    async fn distribution_roles(&self) -> Result<RoleSet, AuthError> {
        Ok(self.store.list_all_roles().await?)
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::auth::errors::StoreError;
    use crate::config::AuthConfig;
    use crate::config::StoreConfig;

    mock! {
        pub TestCredentialStore {}

        #[async_trait]
        impl CredentialStore for TestCredentialStore {
            async fn check_credentials(&self, identifier: &JabberId, password: &str) -> Result<Option<RoleSet>, StoreError>;
            async fn fetch_password(&self, identifier: &JabberId) -> Result<Option<String>, StoreError>;
            async fn fetch_roles(&self, identifier: &JabberId) -> Result<Option<RoleSet>, StoreError>;
            async fn list_all_roles(&self) -> Result<RoleSet, StoreError>;
        }
    }

    fn test_config(non_sasl_digest: bool) -> Arc<Config> {
        Arc::new(Config {
            auth: AuthConfig {
                mechanisms: vec!["PLAIN".to_string(), "DIGEST-MD5".to_string()],
                non_sasl_plain: true,
                non_sasl_digest,
            },
            store: StoreConfig {
                store_type: "postgres".to_string(),
                host: "localhost".to_string(),
                database: "chat".to_string(),
                user: "chat".to_string(),
                pass: "secret".to_string(),
            },
        })
    }

    fn manager(store: MockTestCredentialStore) -> AuthManager<MockTestCredentialStore> {
        AuthManager::new(Arc::new(store), test_config(true))
    }

    fn alice() -> JabberId {
        "alice@example.com".parse().unwrap()
    }

    fn roles(names: &[&str]) -> RoleSet {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[tokio::test]
    async fn test_verify_plain_success_carries_store_roles() {
        let mut store = MockTestCredentialStore::new();
        store
            .expect_check_credentials()
            .withf(|id, password| {
                id == &"alice@example.com".parse::<JabberId>().unwrap() && password == "s3cret"
            })
            .times(1)
            .returning(|_, _| Ok(Some(roles(&["User"]))));

        let principal = manager(store).verify_plain(&alice(), "s3cret").await.unwrap();

        assert!(principal.is_authenticated());
        assert_eq!(principal.roles(), &roles(&["User"]));
    }

    #[tokio::test]
    async fn test_verify_plain_failure_is_unauthenticated_and_role_free() {
        let mut store = MockTestCredentialStore::new();
        store
            .expect_check_credentials()
            .times(1)
            .returning(|_, _| Ok(None));

        let principal = manager(store).verify_plain(&alice(), "wrong").await.unwrap();

        assert!(!principal.is_authenticated());
        assert!(principal.roles().is_empty());
    }

    #[tokio::test]
    async fn test_verify_plain_store_failure_propagates() {
        let mut store = MockTestCredentialStore::new();
        store
            .expect_check_credentials()
            .times(1)
            .returning(|_, _| Err(StoreError::Unavailable("connection refused".to_string())));

        let result = manager(store).verify_plain(&alice(), "s3cret").await;

        assert!(matches!(result, Err(AuthError::Store(_))));
    }

    #[tokio::test]
    async fn test_verify_digest_match_attaches_roles_from_lookup() {
        let presented = sasl::digest::stream_digest("c2s_123", "s3cret");

        let mut store = MockTestCredentialStore::new();
        store
            .expect_fetch_password()
            .times(1)
            .returning(|_| Ok(Some("s3cret".to_string())));
        store
            .expect_fetch_roles()
            .times(1)
            .returning(|_| Ok(Some(roles(&["User", "Admin"]))));

        let principal = manager(store)
            .verify_digest(&alice(), "c2s_123", &presented)
            .await
            .unwrap();

        assert!(principal.is_authenticated());
        assert_eq!(principal.roles(), &roles(&["Admin", "User"]));
    }

    #[tokio::test]
    async fn test_verify_digest_comparison_ignores_hex_case() {
        let presented = sasl::digest::stream_digest("c2s_123", "s3cret").to_uppercase();

        let mut store = MockTestCredentialStore::new();
        store
            .expect_fetch_password()
            .times(1)
            .returning(|_| Ok(Some("s3cret".to_string())));
        store
            .expect_fetch_roles()
            .times(1)
            .returning(|_| Ok(Some(roles(&["User"]))));

        let principal = manager(store)
            .verify_digest(&alice(), "c2s_123", &presented)
            .await
            .unwrap();

        assert!(principal.is_authenticated());
    }

    #[tokio::test]
    async fn test_verify_digest_mismatch_is_unauthenticated() {
        let mut store = MockTestCredentialStore::new();
        store
            .expect_fetch_password()
            .times(1)
            .returning(|_| Ok(Some("s3cret".to_string())));
        store.expect_fetch_roles().times(0);

        let principal = manager(store)
            .verify_digest(&alice(), "c2s_123", "feedfacefeedfacefeedfacefeedfacefeedface")
            .await
            .unwrap();

        assert!(!principal.is_authenticated());
        assert!(principal.roles().is_empty());
    }

    #[tokio::test]
    async fn test_verify_digest_missing_secret_matches_mismatch_outcome() {
        let mut store = MockTestCredentialStore::new();
        store
            .expect_fetch_password()
            .times(1)
            .returning(|_| Ok(None));
        store.expect_fetch_roles().times(0);

        let principal = manager(store)
            .verify_digest(&alice(), "c2s_123", "feedfacefeedfacefeedfacefeedfacefeedface")
            .await
            .unwrap();

        assert!(!principal.is_authenticated());
        assert!(principal.roles().is_empty());
    }

    #[tokio::test]
    async fn test_verify_digest_disabled_never_touches_store() {
        let mut store = MockTestCredentialStore::new();
        store.expect_fetch_password().times(0);
        store.expect_fetch_roles().times(0);

        let manager = AuthManager::new(Arc::new(store), test_config(false));
        let presented = sasl::digest::stream_digest("c2s_123", "s3cret");
        let principal = manager
            .verify_digest(&alice(), "c2s_123", &presented)
            .await
            .unwrap();

        assert!(!principal.is_authenticated());
    }

    #[tokio::test]
    async fn test_precomputed_secret_hash_known_user() {
        let mut store = MockTestCredentialStore::new();
        store
            .expect_fetch_password()
            .times(1)
            .returning(|_| Ok(Some("s3cret".to_string())));

        let hash = manager(store)
            .precomputed_secret_hash(&alice(), "example.com")
            .await
            .unwrap();

        assert_eq!(
            hash,
            sasl::digest::user_realm_secret_hash("alice", "example.com", "s3cret")
        );
    }

    #[tokio::test]
    async fn test_precomputed_secret_hash_unknown_user() {
        let mut store = MockTestCredentialStore::new();
        store
            .expect_fetch_password()
            .times(1)
            .returning(|_| Ok(None));

        let result = manager(store)
            .precomputed_secret_hash(&alice(), "example.com")
            .await;

        assert!(matches!(result, Err(AuthError::UnknownUser(_))));
    }

    #[tokio::test]
    async fn test_resolve_principal_unauthenticated_never_touches_store() {
        let mut store = MockTestCredentialStore::new();
        store.expect_check_credentials().times(0);
        store.expect_fetch_password().times(0);
        store.expect_fetch_roles().times(0);
        store.expect_list_all_roles().times(0);

        let principal = manager(store)
            .resolve_principal(&alice(), false)
            .await
            .unwrap();

        assert!(!principal.is_authenticated());
        assert!(principal.roles().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_principal_authenticated_performs_one_role_lookup() {
        let mut store = MockTestCredentialStore::new();
        store
            .expect_fetch_roles()
            .times(1)
            .returning(|_| Ok(Some(roles(&["User"]))));

        let principal = manager(store)
            .resolve_principal(&alice(), true)
            .await
            .unwrap();

        assert!(principal.is_authenticated());
        assert_eq!(principal.roles(), &roles(&["User"]));
    }

    #[tokio::test]
    async fn test_resolve_principal_vanished_account_stays_authenticated() {
        let mut store = MockTestCredentialStore::new();
        store.expect_fetch_roles().times(1).returning(|_| Ok(None));

        let principal = manager(store)
            .resolve_principal(&alice(), true)
            .await
            .unwrap();

        assert!(principal.is_authenticated());
        assert!(principal.roles().is_empty());
    }

    #[tokio::test]
    async fn test_role_enumeration_operations_agree() {
        let mut store = MockTestCredentialStore::new();
        store
            .expect_list_all_roles()
            .times(2)
            .returning(|| Ok(roles(&["User", "Admin"])));

        let manager = manager(store);
        let security = manager.security_roles().await.unwrap();
        let distribution = manager.distribution_roles().await.unwrap();

        assert_eq!(security, distribution);
        assert_eq!(security, roles(&["Admin", "User"]));
    }

    #[tokio::test]
    async fn test_role_enumeration_store_failure_propagates() {
        let mut store = MockTestCredentialStore::new();
        store
            .expect_list_all_roles()
            .times(1)
            .returning(|| Err(StoreError::Unavailable("timeout".to_string())));

        assert!(matches!(
            manager(store).security_roles().await,
            Err(AuthError::Store(_))
        ));
    }
}
