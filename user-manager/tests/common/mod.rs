use std::sync::Arc;

use user_manager::auth::models::JabberId;
use user_manager::auth::AuthManager;
use user_manager::config::AuthConfig;
use user_manager::config::Config;
use user_manager::config::StoreConfig;
use user_manager::repositories::InMemoryCredentialStore;

/// Test harness wiring an `AuthManager` over a seeded in-memory store.
pub struct TestManager {
    pub store: Arc<InMemoryCredentialStore>,
    pub manager: AuthManager<InMemoryCredentialStore>,
}

impl TestManager {
    pub fn new() -> Self {
        init_tracing();

        let config = Config {
            auth: AuthConfig {
                mechanisms: vec!["PLAIN".to_string(), "DIGEST-MD5".to_string()],
                non_sasl_plain: true,
                non_sasl_digest: true,
            },
            store: StoreConfig {
                store_type: "postgres".to_string(),
                host: "localhost".to_string(),
                database: "chat_test".to_string(),
                user: "chat".to_string(),
                pass: "chat".to_string(),
            },
        };
        config.validate().expect("test config must validate");

        let store = Arc::new(InMemoryCredentialStore::new());
        let manager = AuthManager::new(Arc::clone(&store), Arc::new(config));

        Self { store, manager }
    }

    /// Harness with the standard fixture account seeded.
    pub fn with_alice() -> Self {
        let harness = Self::new();
        harness
            .store
            .add_account(jid("alice@example.com"), "s3cret", ["User".to_string()]);
        harness
    }
}

pub fn jid(s: &str) -> JabberId {
    s.parse().expect("fixture identifier must parse")
}

fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_manager=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}
