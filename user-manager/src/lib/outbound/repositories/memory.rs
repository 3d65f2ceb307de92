use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::auth::errors::StoreError;
use crate::auth::models::JabberId;
use crate::auth::models::RoleSet;
use crate::auth::ports::CredentialStore;

/// In-memory credential store.
///
/// The swappable test double for the Postgres adapter: hosts and the
/// integration suite seed it with accounts and roles up front.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    accounts: RwLock<HashMap<JabberId, Account>>,
    catalogue: RwLock<RoleSet>,
}

struct Account {
    password: String,
    roles: RoleSet,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an account; its roles are added to the role catalogue as well.
    pub fn add_account<I>(&self, identifier: JabberId, password: &str, roles: I)
    where
        I: IntoIterator<Item = String>,
    {
        let roles: RoleSet = roles.into_iter().collect();
        if let Ok(mut catalogue) = self.catalogue.write() {
            catalogue.extend(roles.iter().cloned());
        }
        if let Ok(mut accounts) = self.accounts.write() {
            accounts.insert(
                identifier,
                Account {
                    password: password.to_string(),
                    roles,
                },
            );
        }
    }

    /// Add a role to the catalogue without attaching it to any account.
    pub fn add_role(&self, role: &str) {
        if let Ok(mut catalogue) = self.catalogue.write() {
            catalogue.insert(role.to_string());
        }
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("store lock poisoned".to_string())
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn check_credentials(
        &self,
        identifier: &JabberId,
        password: &str,
    ) -> Result<Option<RoleSet>, StoreError> {
        let accounts = self.accounts.read().map_err(|_| poisoned())?;
        Ok(accounts
            .get(identifier)
            .filter(|account| account.password == password)
            .map(|account| account.roles.clone()))
    }

    async fn fetch_password(&self, identifier: &JabberId) -> Result<Option<String>, StoreError> {
        let accounts = self.accounts.read().map_err(|_| poisoned())?;
        Ok(accounts.get(identifier).map(|a| a.password.clone()))
    }

    async fn fetch_roles(&self, identifier: &JabberId) -> Result<Option<RoleSet>, StoreError> {
        let accounts = self.accounts.read().map_err(|_| poisoned())?;
        Ok(accounts.get(identifier).map(|a| a.roles.clone()))
    }

    async fn list_all_roles(&self) -> Result<RoleSet, StoreError> {
        let catalogue = self.catalogue.read().map_err(|_| poisoned())?;
        Ok(catalogue.clone())
    }
}
