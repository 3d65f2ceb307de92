use async_trait::async_trait;

use crate::auth::errors::AuthError;
use crate::auth::errors::StoreError;
use crate::auth::models::JabberId;
use crate::auth::models::Principal;
use crate::auth::models::RoleSet;

/// Port for the external credential store.
///
/// The store owns all persistent account data; the manager holds no state of
/// its own. Implementations must be safe for concurrent invocation.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Verify a plain-text credential pair and return the account's roles.
    ///
    /// # Arguments
    /// * `identifier` - Account to check (bare pair is the lookup key)
    /// * `password` - Plain-text password presented by the client
    ///
    /// # Returns
    /// `Some(roles)` when the credentials are valid; `None` for a wrong
    /// password or an unknown account - the two cases are deliberately
    /// indistinguishable
    ///
    /// # Errors
    /// * `StoreError` - Store unreachable or query failed
    async fn check_credentials(
        &self,
        identifier: &JabberId,
        password: &str,
    ) -> Result<Option<RoleSet>, StoreError>;

    /// Retrieve the stored secret for an account.
    ///
    /// Digest mechanisms recompute their hashes from this value; it must be
    /// available for every account the store answers for.
    ///
    /// # Returns
    /// `Some(secret)` if the account exists, `None` otherwise
    ///
    /// # Errors
    /// * `StoreError` - Store unreachable or query failed
    async fn fetch_password(&self, identifier: &JabberId) -> Result<Option<String>, StoreError>;

    /// Retrieve an account's roles without a credential check.
    ///
    /// # Returns
    /// `Some(roles)` if the account exists (possibly empty), `None` otherwise
    ///
    /// # Errors
    /// * `StoreError` - Store unreachable or query failed
    async fn fetch_roles(&self, identifier: &JabberId) -> Result<Option<RoleSet>, StoreError>;

    /// Enumerate every role the store knows about.
    ///
    /// # Errors
    /// * `StoreError` - Store unreachable or query failed
    async fn list_all_roles(&self) -> Result<RoleSet, StoreError>;
}

/// Port for authentication-manager operations, one verification path per
/// supported mechanism plus role enumeration.
///
/// Every operation returns a freshly built `Principal`; role sets come from
/// the store on every call and are never cached.
#[async_trait]
pub trait AuthManagerPort: Send + Sync + 'static {
    /// Verify plain-text credentials.
    ///
    /// # Returns
    /// An authenticated principal carrying the store's roles on success; an
    /// unauthenticated, role-free principal on bad credentials or unknown
    /// account (the two cases are indistinguishable to the caller)
    ///
    /// # Errors
    /// * `Store` - Store unreachable; the host must not treat this as a
    ///   failed authentication
    async fn verify_plain(
        &self,
        identifier: &JabberId,
        password: &str,
    ) -> Result<Principal, AuthError>;

    /// Verify a legacy stream digest.
    ///
    /// Recomputes the expected digest from the stored secret and the stream
    /// id, comparing case-insensitively against what the client sent.
    ///
    /// # Arguments
    /// * `identifier` - Account to check
    /// * `stream_id` - Session nonce issued at stream initiation
    /// * `presented_digest` - Hex digest sent by the client
    ///
    /// # Returns
    /// Authenticated principal with roles on a match; unauthenticated
    /// principal on mismatch or missing secret
    ///
    /// # Errors
    /// * `Store` - Store unreachable
    async fn verify_digest(
        &self,
        identifier: &JabberId,
        stream_id: &str,
        presented_digest: &str,
    ) -> Result<Principal, AuthError>;

    /// Derive the reusable `user:realm:secret` hash for DIGEST-MD5.
    ///
    /// # Errors
    /// * `UnknownUser` - The account does not exist; digest negotiation must
    ///   branch before any comparison is possible
    /// * `Store` - Store unreachable
    async fn precomputed_secret_hash(
        &self,
        identifier: &JabberId,
        realm: &str,
    ) -> Result<String, AuthError>;

    /// Build a principal for an identifier whose authentication outcome is
    /// already known (mechanism-internal re-authentication steps).
    ///
    /// Never re-runs credential verification. With `authenticated` false no
    /// store access happens at all; with `authenticated` true exactly one
    /// role lookup is performed.
    ///
    /// # Errors
    /// * `Store` - Store unreachable during the role lookup
    async fn resolve_principal(
        &self,
        identifier: &JabberId,
        authenticated: bool,
    ) -> Result<Principal, AuthError>;

    /// Enumerate security roles for authorization decisions.
    ///
    /// # Errors
    /// * `Store` - Store unreachable
    async fn security_roles(&self) -> Result<RoleSet, AuthError>;

    /// Enumerate distribution roles.
    ///
    /// Kept distinct from `security_roles` because some backends separate
    /// the two; a store that does not returns the same set for both.
    ///
    /// # Errors
    /// * `Store` - Store unreachable
    async fn distribution_roles(&self) -> Result<RoleSet, AuthError>;
}
