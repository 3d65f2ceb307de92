pub mod config;
pub mod domain;
pub mod outbound;
pub mod plugin;

pub use domain::auth;
pub use outbound::repositories;
