use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use roster_core::AccountId;

#[derive(Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub signing_key: Secret<String>,
    pub time_to_live_seconds: i64,
}

impl SessionConfig {
    fn key_bytes(&self) -> &[u8] {
        self.signing_key.expose_secret().as_bytes()
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Token error: {0}")]
    TokenError(jsonwebtoken::errors::Error),
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

/// The envelope carries one field of application meaning: the account id.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

// Create a cookie holding a freshly signed session token
pub fn generate_session_cookie(
    id: AccountId,
    config: &SessionConfig,
) -> Result<Cookie<'static>, SessionError> {
    let token = generate_session_token(id, config)?;
    Ok(build_session_cookie(config.cookie_name.clone(), token))
}

// Create a signed session token referencing the account id
pub fn generate_session_token(
    id: AccountId,
    config: &SessionConfig,
) -> Result<String, SessionError> {
    let delta = chrono::Duration::try_seconds(config.time_to_live_seconds).ok_or(
        SessionError::UnexpectedError("Failed to create session duration".to_string()),
    )?;

    let exp = Utc::now()
        .checked_add_signed(delta)
        .ok_or(SessionError::UnexpectedError(
            "Duration out of range".to_string(),
        ))?
        .timestamp();

    let exp: usize = exp
        .try_into()
        .map_err(|_| SessionError::UnexpectedError("Failed to cast i64 to usize".to_string()))?;

    let claims = Claims {
        sub: id.to_string(),
        exp,
    };

    encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &EncodingKey::from_secret(config.key_bytes()),
    )
    .map_err(SessionError::TokenError)
}

fn build_session_cookie(cookie_name: String, token: String) -> Cookie<'static> {
    Cookie::build((cookie_name, token))
        .path("/") // apply cookie to all URLs on the server
        .http_only(true) // prevent JavaScript from accessing the cookie
        .secure(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Resolve the session reference carried by the request, if any.
///
/// Absent, expired, and tampered envelopes all resolve to `None` - a bad
/// token is treated as no token, never surfaced as an error.
pub fn resolve_session(jar: &CookieJar, config: &SessionConfig) -> Option<AccountId> {
    let cookie = jar.get(&config.cookie_name)?;

    let data = decode::<Claims>(
        cookie.value(),
        &DecodingKey::from_secret(config.key_bytes()),
        &Validation::default(),
    )
    .ok()?;

    data.claims.sub.parse::<AccountId>().ok()
}
