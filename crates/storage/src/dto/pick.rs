use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::Pick;

/// Request payload for recording a predicted winner
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RecordPickRequest {
    pub match_id: Uuid,

    #[validate(length(min = 1, max = 255, message = "Winner must not be empty"))]
    pub winner: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PickResponse {
    pub match_id: Uuid,
    pub round: i32,
    pub picked_player: String,
    pub points: Option<i32>,
    pub updated_at: chrono::NaiveDateTime,
}

impl From<Pick> for PickResponse {
    fn from(pick: Pick) -> Self {
        Self {
            match_id: pick.match_id,
            round: pick.round,
            picked_player: pick.picked_player,
            points: pick.points,
            updated_at: pick.updated_at,
        }
    }
}
