use axum::{
    Router,
    http::{HeaderValue, Method, request},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use roster_adapters::{
    auth::session::SessionConfig,
    http::{
        AppState,
        routes::{list_accounts, login, logout, moderate, register},
    },
};
use roster_core::AccountStore;

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// Main directory service wiring the gated routes to a store.
pub struct RosterService {
    router: Router,
}

impl RosterService {
    pub fn new<S>(store: S, session: SessionConfig) -> Self
    where
        S: AccountStore + 'static,
    {
        let state = AppState::new(store, session);

        let router = Router::new()
            .route("/register", post(register::<S>))
            .route("/login", post(login::<S>))
            .route("/logout", post(logout::<S>))
            .route("/accounts", get(list_accounts::<S>))
            .route("/moderate", post(moderate::<S>))
            .with_state(state);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the service into a router that can be mounted or driven
    /// directly in tests.
    pub fn into_router(mut self, allowed_origins: Option<Vec<String>>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        origin
                            .to_str()
                            .map(|origin| allowed_origins.iter().any(|allowed| allowed == origin))
                            .unwrap_or(false)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the directory service as a standalone server.
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<Vec<String>>,
    ) -> Result<(), std::io::Error> {
        let router = self.into_router(allowed_origins);

        tracing::info!("Roster service listening on {}", listener.local_addr()?);

        axum_server::Server::<std::net::SocketAddr>::from_listener(listener)
            .serve(router.into_make_service())
            .await
    }
}
