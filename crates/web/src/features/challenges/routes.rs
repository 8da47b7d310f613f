use axum::{Router, routing::post};

use super::handlers::{create_challenge, join_challenge};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", post(create_challenge))
}

pub fn join_routes() -> Router<AppState> {
    Router::new().route("/:code", post(join_challenge))
}
