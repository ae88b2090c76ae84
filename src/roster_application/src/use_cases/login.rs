use roster_core::{Account, AccountStore, AccountStoreError, Credential, Email, Password};

/// Error types specific to the login use case.
///
/// Missing accounts and wrong passwords both collapse into
/// [`LoginError::InvalidCredentials`], so a caller probing the login
/// endpoint cannot enumerate registered addresses.
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Account is blocked")]
    Blocked,
    #[error("Account store error: {0}")]
    Store(AccountStoreError),
}

impl From<AccountStoreError> for LoginError {
    fn from(error: AccountStoreError) -> Self {
        match error {
            AccountStoreError::AccountNotFound => LoginError::InvalidCredentials,
            other => LoginError::Store(other),
        }
    }
}

/// Login use case - verifies a credential claim against the store.
pub struct LoginUseCase<'a, S>
where
    S: AccountStore,
{
    store: &'a S,
}

impl<'a, S> LoginUseCase<'a, S>
where
    S: AccountStore,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Execute the login use case.
    ///
    /// Accounts that carry a stored credential require a matching password;
    /// accounts without one authenticate by email alone. On success the
    /// last-seen write lands first - no session may be issued for a write
    /// that did not happen - and the live account is returned for the caller
    /// to mint a session against.
    #[tracing::instrument(name = "LoginUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        email: Email,
        password: Option<Password>,
    ) -> Result<Account, LoginError> {
        let account = self.store.find_by_email(&email).await?;

        if account.is_blocked() {
            return Err(LoginError::Blocked);
        }

        if let Some(credential) = account.credential().cloned() {
            let Some(candidate) = password else {
                return Err(LoginError::InvalidCredentials);
            };
            if !verify_credential(credential, candidate).await {
                return Err(LoginError::InvalidCredentials);
            }
        }

        self.store.touch_last_seen(account.id()).await?;

        Ok(account)
    }
}

/// Argon2 verification is CPU-bound; run it off the async runtime.
#[tracing::instrument(name = "Verify credential", skip_all)]
async fn verify_credential(credential: Credential, candidate: Password) -> bool {
    let current_span = tracing::Span::current();
    tokio::task::spawn_blocking(move || current_span.in_scope(|| credential.verify(&candidate)))
        .await
        .unwrap_or(false)
}
