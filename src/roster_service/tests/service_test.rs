use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use secrecy::Secret;
use serde_json::{Value, json};
use tower::ServiceExt;

use roster_adapters::{HashMapAccountStore, auth::session::SessionConfig};
use roster_core::{AccountStore, Email};
use roster_service::RosterService;

fn session_config() -> SessionConfig {
    SessionConfig {
        cookie_name: "roster_session".to_string(),
        signing_key: Secret::from("test-signing-key".to_string()),
        time_to_live_seconds: 3600,
    }
}

fn test_app() -> (Router, HashMapAccountStore) {
    let store = HashMapAccountStore::new();
    let router = RosterService::new(store.clone(), session_config()).into_router(None);
    (router, store)
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    cookie: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
    }
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie.to_string());
    }
    let request = builder
        .body(body.map_or_else(Body::empty, |value| Body::from(value.to_string())))
        .unwrap();

    router.clone().oneshot(request).await.unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect carries a location")
        .to_str()
        .unwrap()
}

fn session_cookie(response: &Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response carries a session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn account_id(store: &HashMapAccountStore, email: &str) -> i64 {
    let email = Email::try_from(Secret::from(email.to_string())).unwrap();
    store.find_by_email(&email).await.unwrap().id().get()
}

#[tokio::test]
async fn register_login_and_list_flow() {
    let (app, store) = test_app();

    let response = send(
        &app,
        Method::POST,
        "/register",
        Some(json!({"name": "Ann", "email": "Ann@Example.com", "password": "password123"})),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Case-insensitive uniqueness: the same address spelled differently.
    let response = send(
        &app,
        Method::POST,
        "/register",
        Some(json!({"name": "Ann2", "email": "ann@example.com"})),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = send(
        &app,
        Method::POST,
        "/login",
        Some(json!({"email": "ann@example.com", "password": "password123"})),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/accounts");
    let cookie = session_cookie(&response);

    let response = send(&app, Method::GET, "/accounts", None, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let accounts = json_body(response).await;
    assert_eq!(accounts.as_array().unwrap().len(), 1);
    assert_eq!(accounts[0]["email"], "ann@example.com");
    assert!(!accounts[0]["last_seen_at"].is_null());

    let email = Email::try_from(Secret::from("ann@example.com".to_string())).unwrap();
    assert!(store.find_by_email(&email).await.unwrap().last_seen_at().is_some());
}

#[tokio::test]
async fn failed_login_is_a_generic_redirect() {
    let (app, _store) = test_app();

    send(
        &app,
        Method::POST,
        "/register",
        Some(json!({"name": "Ann", "email": "ann@example.com", "password": "password123"})),
        None,
    )
    .await;

    let wrong_password = send(
        &app,
        Method::POST,
        "/login",
        Some(json!({"email": "ann@example.com", "password": "not-the-one"})),
        None,
    )
    .await;
    let unknown_email = send(
        &app,
        Method::POST,
        "/login",
        Some(json!({"email": "bob@example.com", "password": "password123"})),
        None,
    )
    .await;

    // Indistinguishable outcomes, so the endpoint cannot be used to probe
    // for registered addresses.
    assert_eq!(wrong_password.status(), StatusCode::SEE_OTHER);
    assert_eq!(unknown_email.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&wrong_password), location(&unknown_email));
    assert!(wrong_password.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn gated_request_without_session_redirects_to_login() {
    let (app, _store) = test_app();

    let response = send(&app, Method::GET, "/accounts", None, None).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn blocking_invalidates_an_existing_session() {
    let (app, store) = test_app();

    send(
        &app,
        Method::POST,
        "/register",
        Some(json!({"name": "Bob", "email": "bob@example.com"})),
        None,
    )
    .await;
    let login = send(
        &app,
        Method::POST,
        "/login",
        Some(json!({"email": "bob@example.com"})),
        None,
    )
    .await;
    let cookie = session_cookie(&login);

    // Moderation lands between two requests of the same session.
    let id = account_id(&store, "bob@example.com").await;
    store
        .update_blocked(&[roster_core::AccountId::new(id)], true)
        .await
        .unwrap();

    let response = send(&app, Method::GET, "/accounts", None, Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?error=account%20is%20blocked");
}

#[tokio::test]
async fn moderation_reports_per_target_outcomes() {
    let (app, store) = test_app();

    for (name, email) in [("Ann", "ann@example.com"), ("Bob", "bob@example.com")] {
        send(
            &app,
            Method::POST,
            "/register",
            Some(json!({"name": name, "email": email})),
            None,
        )
        .await;
    }
    let login = send(
        &app,
        Method::POST,
        "/login",
        Some(json!({"email": "ann@example.com"})),
        None,
    )
    .await;
    let cookie = session_cookie(&login);

    let bob = account_id(&store, "bob@example.com").await;
    let response = send(
        &app,
        Method::POST,
        "/moderate",
        Some(json!({"action": "block", "targets": [bob, 999]})),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let report = json_body(response).await;
    assert_eq!(report["session_revoked"], false);
    assert_eq!(report["targets"][0]["outcome"], "applied");
    assert_eq!(report["targets"][1]["outcome"], "missing");
}

#[tokio::test]
async fn self_block_revokes_the_session_immediately() {
    let (app, store) = test_app();

    send(
        &app,
        Method::POST,
        "/register",
        Some(json!({"name": "Ann", "email": "ann@example.com"})),
        None,
    )
    .await;
    let login = send(
        &app,
        Method::POST,
        "/login",
        Some(json!({"email": "ann@example.com"})),
        None,
    )
    .await;
    let cookie = session_cookie(&login);

    let ann = account_id(&store, "ann@example.com").await;
    let response = send(
        &app,
        Method::POST,
        "/moderate",
        Some(json!({"action": "block", "targets": [ann]})),
        Some(&cookie),
    )
    .await;

    // The session is cleared in the same operation, not left for the guard.
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    let removal = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(removal.contains("Max-Age=0"));

    // The old envelope is dead on arrival for the next request.
    let response = send(&app, Method::GET, "/accounts", None, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?error=account%20is%20blocked");
}

#[tokio::test]
async fn self_delete_invalidates_the_old_session() {
    let (app, store) = test_app();

    for (name, email) in [("Ann", "ann@example.com"), ("Bob", "bob@example.com")] {
        send(
            &app,
            Method::POST,
            "/register",
            Some(json!({"name": name, "email": email})),
            None,
        )
        .await;
    }
    let login = send(
        &app,
        Method::POST,
        "/login",
        Some(json!({"email": "ann@example.com"})),
        None,
    )
    .await;
    let cookie = session_cookie(&login);

    let ann = account_id(&store, "ann@example.com").await;
    let response = send(
        &app,
        Method::POST,
        "/moderate",
        Some(json!({"action": "delete", "targets": [ann]})),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let response = send(&app, Method::GET, "/accounts", None, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "/login?error=session%20expired%20or%20removed"
    );
}

#[tokio::test]
async fn logout_clears_the_session_cookie() {
    let (app, _store) = test_app();

    send(
        &app,
        Method::POST,
        "/register",
        Some(json!({"name": "Ann", "email": "ann@example.com"})),
        None,
    )
    .await;
    let login = send(
        &app,
        Method::POST,
        "/login",
        Some(json!({"email": "ann@example.com"})),
        None,
    )
    .await;
    let cookie = session_cookie(&login);

    let response = send(&app, Method::POST, "/logout", None, Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    let removal = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(removal.contains("Max-Age=0"));
}
