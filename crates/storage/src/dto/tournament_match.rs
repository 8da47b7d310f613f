use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::{MatchStatus, TournamentMatch};

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct MatchFilter {
    /// Only return matches of this round
    pub round: Option<i32>,
}

/// Request payload for declaring the official winner of a match
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct DeclareResultRequest {
    #[validate(length(min = 1, max = 255, message = "Winner must not be empty"))]
    pub winner: String,
}

/// Request payload for editing the contestants of a pending match
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdatePlayersRequest {
    #[validate(length(min = 1, max = 255))]
    pub player1: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub player2: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MatchResponse {
    pub match_id: Uuid,
    pub challenge_id: Uuid,
    pub round: i32,
    pub position: i32,
    pub player1: Option<String>,
    pub player2: Option<String>,
    pub winner: Option<String>,
    pub status: MatchStatus,
    pub updated_at: chrono::NaiveDateTime,
}

impl From<TournamentMatch> for MatchResponse {
    fn from(m: TournamentMatch) -> Self {
        Self {
            match_id: m.match_id,
            challenge_id: m.challenge_id,
            round: m.round,
            position: m.position,
            player1: m.player1,
            player2: m.player2,
            winner: m.winner,
            status: m.status,
            updated_at: m.updated_at,
        }
    }
}
