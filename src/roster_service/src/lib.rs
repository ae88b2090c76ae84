pub mod roster_service;
pub mod tracing;

pub use roster_service::RosterService;
