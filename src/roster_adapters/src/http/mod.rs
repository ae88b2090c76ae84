pub mod routes;

use std::sync::Arc;

use crate::auth::session::SessionConfig;

/// Shared request state: the store handle and the session parameters.
pub struct AppState<S> {
    pub store: Arc<S>,
    pub session: SessionConfig,
}

impl<S> AppState<S> {
    pub fn new(store: S, session: SessionConfig) -> Self {
        Self {
            store: Arc::new(store),
            session,
        }
    }
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            session: self.session.clone(),
        }
    }
}
