use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    account::{Account, NewAccount},
    account_id::AccountId,
    email::Email,
};

// AccountStore port trait and errors
#[derive(Debug, Error)]
pub enum AccountStoreError {
    #[error("Account not found")]
    AccountNotFound,
    #[error("Email already registered")]
    EmailTaken,
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl PartialEq for AccountStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::AccountNotFound, Self::AccountNotFound) => true,
            (Self::EmailTaken, Self::EmailTaken) => true,
            (Self::Unavailable(_), Self::Unavailable(_)) => true,
            _ => false,
        }
    }
}

/// The single shared mutable resource of the system.
///
/// Implementations provide their own interior mutability; callers never
/// cache account state, because the access guard's correctness depends on
/// reading current state on every request.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_email(&self, email: &Email) -> Result<Account, AccountStoreError>;
    async fn find_by_id(&self, id: AccountId) -> Result<Account, AccountStoreError>;
    /// Insert a new account. Uniqueness of the normalized email is enforced
    /// here, by the store, as the sole duplicate check (no check-then-insert
    /// race); a duplicate fails with [`AccountStoreError::EmailTaken`].
    async fn insert(&self, account: NewAccount) -> Result<Account, AccountStoreError>;
    /// Atomically set the blocked flag on every listed account that exists,
    /// returning the ids actually updated. Missing ids are skipped.
    async fn update_blocked(
        &self,
        ids: &[AccountId],
        blocked: bool,
    ) -> Result<Vec<AccountId>, AccountStoreError>;
    /// Atomically remove every listed account that exists, returning the ids
    /// actually removed.
    async fn delete_by_ids(&self, ids: &[AccountId]) -> Result<Vec<AccountId>, AccountStoreError>;
    /// Record a successful authentication; monotonic per account.
    async fn touch_last_seen(&self, id: AccountId) -> Result<(), AccountStoreError>;
    /// All accounts ordered by id.
    async fn list(&self) -> Result<Vec<Account>, AccountStoreError>;
}
