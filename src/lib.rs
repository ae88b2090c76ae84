//! # Roster - Session-Gated Member Directory
//!
//! This is a facade crate that re-exports all public APIs from the roster
//! service components. Use this crate to get access to the whole directory
//! service in one place.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `Account`, etc.
//! - **Repository traits**: `AccountStore`
//! - **Use cases**: `RegisterUseCase`, `LoginUseCase`, `AccessGuard`, etc.
//! - **Adapters**: `PostgresAccountStore`, `HashMapAccountStore`, the JWT
//!   session envelope, configuration
//! - **Service**: `RosterService` - The main entry point

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use roster_core::*;
}

// Re-export most commonly used core types at the root level
pub use roster_core::{
    Account, AccountId, AuthorizationResult, Credential, DenyReason, Email, NewAccount, Password,
};

// ============================================================================
// Repository Traits (Ports)
// ============================================================================

/// Repository trait definitions
pub mod repositories {
    pub use roster_core::{AccountStore, AccountStoreError};
}

pub use roster_core::{AccountStore, AccountStoreError};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use roster_application::*;
}

// Re-export use cases at root level
pub use roster_application::{
    AccessGuard, ListAccountsUseCase, LoginUseCase, ModerateUseCase, ModerationAction,
    RegisterUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers
    pub mod http {
        pub use roster_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use roster_adapters::persistence::*;
    }

    /// JWT session envelope utilities
    pub mod auth {
        pub use roster_adapters::auth::*;
    }

    /// Configuration
    pub mod config {
        pub use roster_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use roster_adapters::{HashMapAccountStore, PostgresAccountStore, RosterSetting};

// ============================================================================
// Roster Service (Main Entry Point)
// ============================================================================

/// Main directory service
pub use roster_service::RosterService;

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing repository traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
