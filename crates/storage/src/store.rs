use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    Challenge, MatchUpdate, NewChallenge, NewMatch, Participant, Pick, TournamentMatch,
};

/// Persistence collaborator behind every bracket operation.
///
/// Implementations return [`crate::error::StorageError::NotFound`] for absent rows
/// and apply last-write-wins on the upsert keys.
#[async_trait]
pub trait BracketStore: Send + Sync {
    async fn get_challenge(&self, challenge_id: Uuid) -> Result<Challenge>;

    async fn find_challenge_by_invite_code(&self, invite_code: &str) -> Result<Challenge>;

    async fn insert_challenge(&self, challenge: &NewChallenge) -> Result<Challenge>;

    /// Matches ordered by round then position.
    async fn get_matches(
        &self,
        challenge_id: Uuid,
        round: Option<i32>,
    ) -> Result<Vec<TournamentMatch>>;

    async fn get_match(&self, match_id: Uuid) -> Result<TournamentMatch>;

    async fn find_match(
        &self,
        challenge_id: Uuid,
        round: i32,
        position: i32,
    ) -> Result<TournamentMatch>;

    async fn insert_matches(
        &self,
        challenge_id: Uuid,
        matches: &[NewMatch],
    ) -> Result<Vec<TournamentMatch>>;

    async fn update_match(&self, match_id: Uuid, update: &MatchUpdate) -> Result<TournamentMatch>;

    /// Insert or overwrite the pick keyed by (participant, match).
    async fn upsert_pick(
        &self,
        participant_id: Uuid,
        match_id: Uuid,
        round: i32,
        picked_player: &str,
    ) -> Result<Pick>;

    async fn get_picks(&self, participant_id: Uuid) -> Result<Vec<Pick>>;

    async fn find_participant(&self, challenge_id: Uuid, user_id: Uuid) -> Result<Participant>;

    /// Returns the existing membership when the user already joined.
    async fn add_participant(&self, challenge_id: Uuid, user_id: Uuid) -> Result<Participant>;
}
