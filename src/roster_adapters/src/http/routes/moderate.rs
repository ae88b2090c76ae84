use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{CookieJar, cookie::Cookie};
use serde::Deserialize;

use roster_application::{AccessGuard, ModerateUseCase, ModerationAction};
use roster_core::{AccountId, AccountStore, AuthorizationResult};

use crate::auth::session::resolve_session;
use crate::http::AppState;

use super::{deny, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct ModerateRequest {
    pub action: ModerationAction,
    pub targets: Vec<AccountId>,
}

#[tracing::instrument(name = "Moderate", skip_all)]
pub async fn moderate<S>(
    State(state): State<AppState<S>>,
    jar: CookieJar,
    Json(request): Json<ModerateRequest>,
) -> Response
where
    S: AccountStore + 'static,
{
    let session = resolve_session(&jar, &state.session);

    let guard = AccessGuard::new(state.store.as_ref());
    let actor = match guard.authorize(session).await {
        AuthorizationResult::Authorized(account) => account,
        AuthorizationResult::Unauthorized(reason) => return deny(jar, &state.session, reason),
    };

    let use_case = ModerateUseCase::new(state.store.as_ref());
    match use_case
        .execute(actor.id(), request.action, &request.targets)
        .await
    {
        // The actor moderated themselves out: clear the session now rather
        // than leaving the stale envelope for the guard to reject later.
        Ok(report) if report.session_revoked => {
            let jar = jar.remove(Cookie::from(state.session.cookie_name.clone()));
            (jar, Redirect::to("/login")).into_response()
        }
        Ok(report) => Json(report).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
