use axum::{
    Router,
    routing::{get, put},
};

use super::handlers::{declare_result, list_matches, reset_result, set_players};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/:challenge_id/matches", get(list_matches))
        .route(
            "/:challenge_id/matches/:match_id/result",
            put(declare_result).delete(reset_result),
        )
        .route("/:challenge_id/matches/:match_id/players", put(set_players))
}
