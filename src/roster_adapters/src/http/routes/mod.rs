pub mod accounts;
pub mod error;
pub mod login;
pub mod logout;
pub mod moderate;
pub mod register;

pub use accounts::list_accounts;
pub use error::ApiError;
pub use login::{LoginRequest, login};
pub use logout::logout;
pub use moderate::{ModerateRequest, moderate};
pub use register::{RegisterRequest, register};

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::{CookieJar, cookie::Cookie};

use roster_core::DenyReason;

use crate::auth::session::SessionConfig;

/// Turn an access-guard denial into the terminal redirect decision.
///
/// Only detected invalidity (blocked or removed account) clears the session
/// on the way out; a missing session has nothing to clear, and a store
/// outage must not destroy a session that may still be good.
pub(crate) fn deny(jar: CookieJar, config: &SessionConfig, reason: DenyReason) -> Response {
    let redirect = redirect_to_login(reason);
    match reason {
        DenyReason::AccountRemoved | DenyReason::Blocked => {
            let jar = jar.remove(Cookie::from(config.cookie_name.clone()));
            (jar, redirect).into_response()
        }
        DenyReason::NoSession | DenyReason::Unavailable => redirect.into_response(),
    }
}

pub(crate) fn redirect_to_login(reason: DenyReason) -> Redirect {
    match reason.message() {
        Some(message) => Redirect::to(&format!("/login?error={}", message.replace(' ', "%20"))),
        None => Redirect::to("/login"),
    }
}
