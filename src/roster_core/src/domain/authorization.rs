use crate::domain::account::Account;

/// The per-request access decision.
///
/// A session token only asserts "this client once authenticated as account
/// X"; whether X is currently in good standing is decided here, against live
/// store state, on every gated request. The presentation collaborator turns
/// an `Unauthorized` decision into a redirect.
#[derive(Debug)]
pub enum AuthorizationResult {
    Authorized(Account),
    Unauthorized(DenyReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No session, or one that failed signature/expiry checks (treated as absent).
    NoSession,
    /// The session referenced an account that no longer exists.
    AccountRemoved,
    /// The referenced account is blocked.
    Blocked,
    /// The store could not be reached; access fails closed.
    Unavailable,
}

impl DenyReason {
    /// Human-readable reason carried on the redirect, if any.
    pub fn message(self) -> Option<&'static str> {
        match self {
            Self::NoSession => None,
            Self::AccountRemoved => Some("session expired or removed"),
            Self::Blocked => Some("account is blocked"),
            Self::Unavailable => None,
        }
    }
}
