use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Pick {
    pub pick_id: Uuid,
    pub participant_id: Uuid,
    pub match_id: Uuid,
    pub round: i32,
    pub picked_player: String,
    /// Awarded once real results are known; computed outside this service.
    pub points: Option<i32>,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}
