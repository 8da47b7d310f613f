use std::sync::Arc;

use axum::extract::FromRef;
use storage::BracketStore;

use crate::middleware::auth::JwtAuth;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BracketStore>,
    pub auth: JwtAuth,
}

impl AppState {
    pub fn new(store: Arc<dyn BracketStore>, auth: JwtAuth) -> Self {
        Self { store, auth }
    }
}

impl FromRef<AppState> for JwtAuth {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}
