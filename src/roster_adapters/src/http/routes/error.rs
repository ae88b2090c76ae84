use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use roster_application::{ModerateError, RegisterError};
use roster_core::{AccountStoreError, EmailError, PasswordError};

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// API-surfaced errors. Authentication and session failures never appear
/// here - those paths answer with a redirect decision instead.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Email already registered")]
    EmailTaken,

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            ApiError::InvalidInput(_) => (StatusCode::BAD_REQUEST, self.to_string()),

            ApiError::EmailTaken => (StatusCode::CONFLICT, self.to_string()),

            ApiError::UnexpectedError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status_code, body).into_response()
    }
}

impl From<EmailError> for ApiError {
    fn from(error: EmailError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<PasswordError> for ApiError {
    fn from(error: PasswordError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<AccountStoreError> for ApiError {
    fn from(error: AccountStoreError) -> Self {
        match error {
            AccountStoreError::EmailTaken => ApiError::EmailTaken,
            other => ApiError::UnexpectedError(other.to_string()),
        }
    }
}

impl From<RegisterError> for ApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::EmailTaken => ApiError::EmailTaken,
            RegisterError::Hashing(e) => ApiError::UnexpectedError(e),
            RegisterError::Store(e) => ApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<ModerateError> for ApiError {
    fn from(error: ModerateError) -> Self {
        match error {
            ModerateError::Store(e) => ApiError::UnexpectedError(e.to_string()),
        }
    }
}
