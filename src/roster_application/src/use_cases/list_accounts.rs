use roster_core::{Account, AccountStore, AccountStoreError};

/// Directory listing use case - hands the presentation layer the current
/// account set. Runs behind the access guard.
pub struct ListAccountsUseCase<'a, S>
where
    S: AccountStore,
{
    store: &'a S,
}

impl<'a, S> ListAccountsUseCase<'a, S>
where
    S: AccountStore,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    #[tracing::instrument(name = "ListAccountsUseCase::execute", skip_all)]
    pub async fn execute(&self) -> Result<Vec<Account>, AccountStoreError> {
        self.store.list().await
    }
}
