use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Membership of a user in a challenge, unique per (challenge, user).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Participant {
    pub participant_id: Uuid,
    pub challenge_id: Uuid,
    pub user_id: Uuid,
    pub joined_at: chrono::NaiveDateTime,
}
