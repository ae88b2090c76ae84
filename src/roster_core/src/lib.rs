pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    account::{Account, NewAccount},
    account_id::AccountId,
    authorization::{AuthorizationResult, DenyReason},
    credential::{Credential, CredentialError},
    email::{Email, EmailError},
    password::{Password, PasswordError},
};

pub use ports::repositories::{AccountStore, AccountStoreError};
