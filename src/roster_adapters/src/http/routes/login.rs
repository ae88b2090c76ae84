use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use secrecy::Secret;
use serde::Deserialize;

use roster_application::{LoginError, LoginUseCase};
use roster_core::{Account, AccountStore, Email, Password};

use crate::auth::session::generate_session_cookie;
use crate::http::AppState;

/// Every way a login can fail answers with this one redirect, so the
/// endpoint reveals nothing about which addresses are registered.
const LOGIN_FAILED: &str = "/login?error=invalid%20credentials";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Secret<String>,
    pub password: Option<Secret<String>>,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<S>(
    State(state): State<AppState<S>>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Response
where
    S: AccountStore + 'static,
{
    let account = match try_login(&state, request).await {
        Ok(account) => account,
        Err(_) => return Redirect::to(LOGIN_FAILED).into_response(),
    };

    match generate_session_cookie(account.id(), &state.session) {
        Ok(cookie) => (jar.add(cookie), Redirect::to("/accounts")).into_response(),
        Err(_) => Redirect::to(LOGIN_FAILED).into_response(),
    }
}

async fn try_login<S>(state: &AppState<S>, request: LoginRequest) -> Result<Account, LoginError>
where
    S: AccountStore,
{
    let email = Email::try_from(request.email).map_err(|_| LoginError::InvalidCredentials)?;
    let password = request
        .password
        .map(Password::try_from)
        .transpose()
        .map_err(|_| LoginError::InvalidCredentials)?;

    LoginUseCase::new(state.store.as_ref())
        .execute(email, password)
        .await
}
