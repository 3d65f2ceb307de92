use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::Row;

use crate::auth::errors::StoreError;
use crate::auth::models::JabberId;
use crate::auth::models::RoleSet;
use crate::auth::ports::CredentialStore;

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_store_error(e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => StoreError::Unavailable(e.to_string()),
        other => StoreError::Query(other.to_string()),
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn check_credentials(
        &self,
        identifier: &JabberId,
        password: &str,
    ) -> Result<Option<RoleSet>, StoreError> {
        match self.fetch_password(identifier).await? {
            Some(stored) if stored == password => {
                let roles = self.fetch_roles(identifier).await?.unwrap_or_default();
                Ok(Some(roles))
            }
            _ => Ok(None),
        }
    }

    async fn fetch_password(&self, identifier: &JabberId) -> Result<Option<String>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT password
            FROM users
            WHERE local = $1 AND domain = $2
            "#,
        )
        .bind(identifier.local())
        .bind(identifier.domain())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_store_error)?;

        row.map(|r| r.try_get("password"))
            .transpose()
            .map_err(map_store_error)
    }

    async fn fetch_roles(&self, identifier: &JabberId) -> Result<Option<RoleSet>, StoreError> {
        let exists = sqlx::query(
            r#"
            SELECT 1
            FROM users
            WHERE local = $1 AND domain = $2
            "#,
        )
        .bind(identifier.local())
        .bind(identifier.domain())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_store_error)?;

        if exists.is_none() {
            return Ok(None);
        }

        let rows = sqlx::query(
            r#"
            SELECT role
            FROM user_roles
            WHERE local = $1 AND domain = $2
            "#,
        )
        .bind(identifier.local())
        .bind(identifier.domain())
        .fetch_all(&self.pool)
        .await
        .map_err(map_store_error)?;

        rows.into_iter()
            .map(|r| r.try_get("role").map_err(map_store_error))
            .collect::<Result<RoleSet, _>>()
            .map(Some)
    }

    async fn list_all_roles(&self) -> Result<RoleSet, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT name
            FROM roles
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_store_error)?;

        rows.into_iter()
            .map(|r| r.try_get("name").map_err(map_store_error))
            .collect()
    }
}
