use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use tokio::sync::RwLock;

use roster_core::{Account, AccountId, AccountStore, AccountStoreError, Email, NewAccount};

/// In-memory store for tests and local runs. Ids come from a monotonic
/// counter and are never reused, matching the database-backed store.
#[derive(Default, Clone)]
pub struct HashMapAccountStore {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
    next_id: Arc<AtomicI64>,
}

impl HashMapAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl AccountStore for HashMapAccountStore {
    async fn find_by_email(&self, email: &Email) -> Result<Account, AccountStoreError> {
        let accounts = self.accounts.read().await;
        accounts
            .values()
            .find(|account| account.email() == email)
            .cloned()
            .ok_or(AccountStoreError::AccountNotFound)
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Account, AccountStoreError> {
        let accounts = self.accounts.read().await;
        accounts
            .get(&id)
            .cloned()
            .ok_or(AccountStoreError::AccountNotFound)
    }

    async fn insert(&self, account: NewAccount) -> Result<Account, AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        if accounts
            .values()
            .any(|existing| existing.email() == &account.email)
        {
            return Err(AccountStoreError::EmailTaken);
        }

        let id = AccountId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let created = Account::new(id, account.name, account.email, account.credential, false, None);
        accounts.insert(id, created.clone());
        Ok(created)
    }

    async fn update_blocked(
        &self,
        ids: &[AccountId],
        blocked: bool,
    ) -> Result<Vec<AccountId>, AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let mut applied = Vec::new();
        for id in ids {
            if let Some(account) = accounts.get_mut(id) {
                account.set_blocked(blocked);
                applied.push(*id);
            }
        }
        Ok(applied)
    }

    async fn delete_by_ids(&self, ids: &[AccountId]) -> Result<Vec<AccountId>, AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        Ok(ids
            .iter()
            .filter(|id| accounts.remove(id).is_some())
            .copied()
            .collect())
    }

    async fn touch_last_seen(&self, id: AccountId) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(&id)
            .ok_or(AccountStoreError::AccountNotFound)?;
        account.touch(Utc::now());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Account>, AccountStoreError> {
        let accounts = self.accounts.read().await;
        let mut all: Vec<Account> = accounts.values().cloned().collect();
        all.sort_by_key(Account::id);
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    fn new_account(name: &str, email: &str) -> NewAccount {
        NewAccount {
            name: name.to_string(),
            email: Email::try_from(Secret::from(email.to_string())).unwrap(),
            credential: None,
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = HashMapAccountStore::new();
        store.insert(new_account("Ann", "Ann@Example.com")).await.unwrap();

        // Normalization makes the case variant the same address.
        let result = store.insert(new_account("Ann2", "ann@example.com")).await;

        assert_eq!(result.unwrap_err(), AccountStoreError::EmailTaken);
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn ids_are_never_reused() {
        let store = HashMapAccountStore::new();
        let first = store.insert(new_account("Ann", "ann@example.com")).await.unwrap();

        store.delete_by_ids(&[first.id()]).await.unwrap();
        let second = store.insert(new_account("Ann", "ann@example.com")).await.unwrap();

        assert!(second.id() > first.id());
    }

    #[tokio::test]
    async fn update_blocked_reports_only_existing_ids() {
        let store = HashMapAccountStore::new();
        let account = store.insert(new_account("Ann", "ann@example.com")).await.unwrap();
        let ghost = AccountId::new(99);

        let applied = store.update_blocked(&[account.id(), ghost], true).await.unwrap();

        assert_eq!(applied, vec![account.id()]);
        assert!(store.find_by_id(account.id()).await.unwrap().is_blocked());
    }

    #[tokio::test]
    async fn touch_sets_last_seen() {
        let store = HashMapAccountStore::new();
        let account = store.insert(new_account("Ann", "ann@example.com")).await.unwrap();
        assert_eq!(account.last_seen_at(), None);

        store.touch_last_seen(account.id()).await.unwrap();

        let reloaded = store.find_by_id(account.id()).await.unwrap();
        assert!(reloaded.last_seen_at().is_some());
    }

    #[tokio::test]
    async fn list_is_ordered_by_id() {
        let store = HashMapAccountStore::new();
        store.insert(new_account("Ann", "ann@example.com")).await.unwrap();
        store.insert(new_account("Bob", "bob@example.com")).await.unwrap();

        let all = store.list().await.unwrap();
        let ids: Vec<i64> = all.iter().map(|a| a.id().get()).collect();

        assert_eq!(ids, vec![1, 2]);
    }
}
