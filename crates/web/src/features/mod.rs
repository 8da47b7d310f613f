pub mod challenges;
pub mod matches;
pub mod picks;

use axum::{Router, middleware};

use crate::middleware::auth::require_auth;
use crate::state::AppState;

/// Every `/api` route; all of them require a bearer token.
pub fn api_router(state: AppState) -> Router {
    let challenges = Router::new()
        .merge(challenges::routes::routes())
        .merge(matches::routes::routes())
        .merge(picks::routes::routes());

    let api = Router::new()
        .nest("/challenges", challenges)
        .nest("/join", challenges::routes::join_routes())
        .route_layer(middleware::from_fn_with_state(
            state.auth.clone(),
            require_auth,
        ));

    Router::new().nest("/api", api).with_state(state)
}
