use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::{CookieJar, cookie::Cookie};

use roster_core::AccountStore;

use crate::http::AppState;

#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout<S>(State(state): State<AppState<S>>, jar: CookieJar) -> impl IntoResponse
where
    S: AccountStore + 'static,
{
    let jar = jar.remove(Cookie::from(state.session.cookie_name.clone()));
    (jar, Redirect::to("/login"))
}
