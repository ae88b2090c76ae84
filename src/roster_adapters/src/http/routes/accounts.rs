use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use serde::Serialize;

use roster_application::{AccessGuard, ListAccountsUseCase};
use roster_core::{Account, AccountId, AccountStore, AuthorizationResult};

use crate::auth::session::resolve_session;
use crate::http::AppState;

use super::{deny, error::ApiError};

#[derive(Debug, Serialize)]
pub struct AccountView {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub is_blocked: bool,
    pub last_seen_at: Option<DateTime<Utc>>,
}

impl From<Account> for AccountView {
    fn from(account: Account) -> Self {
        Self {
            id: account.id(),
            name: account.name().to_string(),
            email: account.email().as_ref().expose_secret().clone(),
            is_blocked: account.is_blocked(),
            last_seen_at: account.last_seen_at(),
        }
    }
}

#[tracing::instrument(name = "List accounts", skip_all)]
pub async fn list_accounts<S>(State(state): State<AppState<S>>, jar: CookieJar) -> Response
where
    S: AccountStore + 'static,
{
    let session = resolve_session(&jar, &state.session);

    let guard = AccessGuard::new(state.store.as_ref());
    match guard.authorize(session).await {
        AuthorizationResult::Authorized(_account) => {
            let use_case = ListAccountsUseCase::new(state.store.as_ref());
            match use_case.execute().await {
                Ok(accounts) => {
                    let views: Vec<AccountView> =
                        accounts.into_iter().map(AccountView::from).collect();
                    Json(views).into_response()
                }
                Err(e) => ApiError::from(e).into_response(),
            }
        }
        AuthorizationResult::Unauthorized(reason) => deny(jar, &state.session, reason),
    }
}
