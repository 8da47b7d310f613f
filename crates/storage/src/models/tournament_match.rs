use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::bracket::Slot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Pending,
    Completed,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown match status '{0}'")]
pub struct UnknownMatchStatus(String);

impl TryFrom<String> for MatchStatus {
    type Error = UnknownMatchStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            _ => Err(UnknownMatchStatus(value)),
        }
    }
}

/// One fixture of a challenge's official bracket, addressed by (round, position).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TournamentMatch {
    pub match_id: Uuid,
    pub challenge_id: Uuid,
    pub round: i32,
    pub position: i32,
    pub player1: Option<String>,
    pub player2: Option<String>,
    pub winner: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: MatchStatus,
    pub updated_at: chrono::NaiveDateTime,
}

impl TournamentMatch {
    pub fn player(&self, slot: Slot) -> Option<&str> {
        match slot {
            Slot::Player1 => self.player1.as_deref(),
            Slot::Player2 => self.player2.as_deref(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }
}

/// Field changes accepted by [`crate::store::BracketStore::update_match`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchUpdate {
    /// Fill or clear one contestant slot, used when a winner advances.
    Slot { slot: Slot, player: Option<String> },
    /// Admin edit of both contestants.
    Players {
        player1: Option<String>,
        player2: Option<String>,
    },
    /// Declare or reset the result.
    Result {
        winner: Option<String>,
        status: MatchStatus,
    },
}

/// A match row to insert when a challenge is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMatch {
    pub round: i32,
    pub position: i32,
    pub player1: Option<String>,
    pub player2: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing() {
        assert_eq!(
            MatchStatus::try_from("pending".to_string()).unwrap(),
            MatchStatus::Pending
        );
        assert_eq!(
            MatchStatus::try_from("completed".to_string()).unwrap(),
            MatchStatus::Completed
        );
        assert!(MatchStatus::try_from("cancelled".to_string()).is_err());
    }

    #[test]
    fn test_status_round_trips_through_as_str() {
        for status in [MatchStatus::Pending, MatchStatus::Completed] {
            assert_eq!(
                MatchStatus::try_from(status.as_str().to_string()).unwrap(),
                status
            );
        }
    }
}
