pub mod auth;
pub mod config;
pub mod http;
pub mod persistence;

// Re-export commonly used adapters for convenience
pub use auth::session::{SessionConfig, generate_session_cookie, resolve_session};
pub use config::settings::RosterSetting;
pub use http::AppState;
pub use persistence::{HashMapAccountStore, PostgresAccountStore};
