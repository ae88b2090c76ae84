use roster_core::{AccountId, AccountStore, AccountStoreError, AuthorizationResult, DenyReason};

/// Access guard - resolves a session reference to a currently-valid account.
///
/// The store lookup happens on every gated request; a cached snapshot would
/// let a freshly blocked or deleted account keep riding an old session.
pub struct AccessGuard<'a, S>
where
    S: AccountStore,
{
    store: &'a S,
}

impl<'a, S> AccessGuard<'a, S>
where
    S: AccountStore,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Decide whether the request may proceed.
    ///
    /// `session` is the account id carried by the request's envelope,
    /// already resolved once at the boundary; absent, expired, and tampered
    /// envelopes all arrive as `None`. Store failures deny access rather
    /// than erroring - the guard fails closed.
    #[tracing::instrument(name = "AccessGuard::authorize", skip(self))]
    pub async fn authorize(&self, session: Option<AccountId>) -> AuthorizationResult {
        let Some(id) = session else {
            return AuthorizationResult::Unauthorized(DenyReason::NoSession);
        };

        match self.store.find_by_id(id).await {
            Ok(account) if account.is_blocked() => {
                AuthorizationResult::Unauthorized(DenyReason::Blocked)
            }
            Ok(account) => AuthorizationResult::Authorized(account),
            Err(AccountStoreError::AccountNotFound) => {
                AuthorizationResult::Unauthorized(DenyReason::AccountRemoved)
            }
            Err(_) => AuthorizationResult::Unauthorized(DenyReason::Unavailable),
        }
    }
}
