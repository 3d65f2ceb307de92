pub mod errors;
pub mod models;
pub mod ports;
pub mod service;

pub use models::JabberId;
pub use models::Principal;
pub use models::RoleSet;
pub use service::AuthManager;
