use axum::{Router, routing::get};

use super::handlers::{get_bracket, list_picks, record_pick};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/:challenge_id/bracket", get(get_bracket))
        .route("/:challenge_id/picks", get(list_picks).put(record_pick))
}
