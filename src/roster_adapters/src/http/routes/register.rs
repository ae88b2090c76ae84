use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;

use roster_application::RegisterUseCase;
use roster_core::{AccountStore, Email, Password};

use crate::http::AppState;

use super::error::ApiError;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: Secret<String>,
    pub password: Option<Secret<String>>,
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<S>(
    State(state): State<AppState<S>>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    S: AccountStore + 'static,
{
    let email = Email::try_from(request.email)?;
    let password = request.password.map(Password::try_from).transpose()?;

    let use_case = RegisterUseCase::new(state.store.as_ref());
    use_case.execute(request.name, email, password).await?;

    Ok((
        StatusCode::CREATED,
        String::from("Account created successfully!"),
    ))
}
