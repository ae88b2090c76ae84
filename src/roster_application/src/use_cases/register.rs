use roster_core::{Account, AccountStore, AccountStoreError, Credential, Email, NewAccount, Password};

/// Error types for the registration use case.
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("Email already registered")]
    EmailTaken,
    #[error("Failed to hash credential: {0}")]
    Hashing(String),
    #[error("Account store error: {0}")]
    Store(AccountStoreError),
}

impl From<AccountStoreError> for RegisterError {
    fn from(error: AccountStoreError) -> Self {
        match error {
            AccountStoreError::EmailTaken => RegisterError::EmailTaken,
            other => RegisterError::Store(other),
        }
    }
}

/// Registration use case - creates an account without authenticating it.
pub struct RegisterUseCase<'a, S>
where
    S: AccountStore,
{
    store: &'a S,
}

impl<'a, S> RegisterUseCase<'a, S>
where
    S: AccountStore,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Execute the registration use case.
    ///
    /// The single insert is the only duplicate check; the store's uniqueness
    /// constraint decides, so there is no check-then-insert race.
    #[tracing::instrument(name = "RegisterUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        name: String,
        email: Email,
        password: Option<Password>,
    ) -> Result<Account, RegisterError> {
        let credential = match password {
            Some(password) => Some(
                hash_credential(password)
                    .await
                    .map_err(RegisterError::Hashing)?,
            ),
            None => None,
        };

        let account = self
            .store
            .insert(NewAccount {
                name,
                email,
                credential,
            })
            .await?;

        Ok(account)
    }
}

/// Argon2 hashing is CPU-bound; run it off the async runtime.
#[tracing::instrument(name = "Hash credential", skip_all)]
async fn hash_credential(password: Password) -> Result<Credential, String> {
    let current_span = tracing::Span::current();
    tokio::task::spawn_blocking(move || {
        current_span.in_scope(|| Credential::hash(&password).map_err(|e| e.to_string()))
    })
    .await
    .map_err(|e| e.to_string())?
}
