use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A participant's bracket with every pick folded forward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BracketView {
    pub challenge_id: Uuid,
    pub locked: bool,
    pub rounds: Vec<RoundView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RoundView {
    pub round: i32,
    pub name: String,
    pub matches: Vec<MatchView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MatchView {
    pub match_id: Uuid,
    pub round: i32,
    pub position: i32,
    /// `None` while the feeding match has no picked winner (TBD)
    pub player1: Option<String>,
    pub player2: Option<String>,
    /// The stored pick, even when it no longer applies
    pub pick: Option<String>,
    /// The pick, if it names one of the projected contestants
    pub winner: Option<String>,
    /// A stored pick that is not one of the projected contestants
    pub stale: bool,
    pub official_winner: Option<String>,
    /// Both contestants known and the challenge still open
    pub selectable: bool,
}

impl BracketView {
    pub fn find(&self, match_id: Uuid) -> Option<&MatchView> {
        self.rounds
            .iter()
            .flat_map(|r| r.matches.iter())
            .find(|m| m.match_id == match_id)
    }

    pub fn at(&self, round: i32, position: i32) -> Option<&MatchView> {
        self.rounds
            .iter()
            .find(|r| r.round == round)
            .and_then(|r| r.matches.iter().find(|m| m.position == position))
    }

    /// True once every match carries a valid pick.
    pub fn is_complete(&self) -> bool {
        self.rounds
            .iter()
            .flat_map(|r| r.matches.iter())
            .all(|m| m.winner.is_some())
    }
}
