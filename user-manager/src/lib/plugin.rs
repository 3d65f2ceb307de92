use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;

use crate::auth::AuthManager;
use crate::config::Config;
use crate::config::ConfigurationError;
use crate::outbound::repositories::PostgresCredentialStore;

/// Error raised when the plugin fails to reach a ready state.
#[derive(Debug, Error)]
pub enum InitError {
    #[error(transparent)]
    Config(#[from] ConfigurationError),

    #[error("Failed to connect to credential store: {0}")]
    Connect(#[from] sqlx::Error),
}

/// The plugin's lifecycle handle.
///
/// The host calls `initialize` exactly once before any verification call and
/// `shutdown` after the last one completes. The manager it hands out is
/// shared freely across connections.
pub struct Plugin {
    manager: Arc<AuthManager<PostgresCredentialStore>>,
    pool: PgPool,
}

impl Plugin {
    /// Validate the configuration, connect to the credential store and
    /// build the authentication manager.
    ///
    /// # Errors
    /// * `Config` - Malformed or incomplete configuration; the plugin does
    ///   not start
    /// * `Connect` - Credential store unreachable
    pub async fn initialize(config: Config) -> Result<Self, InitError> {
        config.validate()?;

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&config.store().connection_url())
            .await?;
        tracing::info!(
            max_connections = 5,
            store = "postgres",
            "Credential store connection pool created"
        );

        let store = Arc::new(PostgresCredentialStore::new(pool.clone()));
        let manager = Arc::new(AuthManager::new(store, Arc::new(config)));

        tracing::info!("User manager ready");
        Ok(Self { manager, pool })
    }

    /// The shared authentication manager.
    pub fn manager(&self) -> Arc<AuthManager<PostgresCredentialStore>> {
        Arc::clone(&self.manager)
    }

    /// Release the credential store pool.
    pub async fn shutdown(self) {
        self.pool.close().await;
        tracing::info!("User manager shut down");
    }
}
