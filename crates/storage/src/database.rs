use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    Challenge, MatchUpdate, NewChallenge, NewMatch, Participant, Pick, TournamentMatch,
};
use crate::repository::{
    challenge::ChallengeRepository, participant::ParticipantRepository, pick::PickRepository,
    tournament_match::MatchRepository,
};
use crate::store::BracketStore;

/// PostgreSQL connection pool plus the embedded schema migrations.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl BracketStore for Database {
    async fn get_challenge(&self, challenge_id: Uuid) -> Result<Challenge> {
        ChallengeRepository::new(&self.pool)
            .find_by_id(challenge_id)
            .await
    }

    async fn find_challenge_by_invite_code(&self, invite_code: &str) -> Result<Challenge> {
        ChallengeRepository::new(&self.pool)
            .find_by_invite_code(invite_code)
            .await
    }

    async fn insert_challenge(&self, challenge: &NewChallenge) -> Result<Challenge> {
        ChallengeRepository::new(&self.pool).create(challenge).await
    }

    async fn get_matches(
        &self,
        challenge_id: Uuid,
        round: Option<i32>,
    ) -> Result<Vec<TournamentMatch>> {
        MatchRepository::new(&self.pool)
            .list(challenge_id, round)
            .await
    }

    async fn get_match(&self, match_id: Uuid) -> Result<TournamentMatch> {
        MatchRepository::new(&self.pool).find_by_id(match_id).await
    }

    async fn find_match(
        &self,
        challenge_id: Uuid,
        round: i32,
        position: i32,
    ) -> Result<TournamentMatch> {
        MatchRepository::new(&self.pool)
            .find_at(challenge_id, round, position)
            .await
    }

    async fn insert_matches(
        &self,
        challenge_id: Uuid,
        matches: &[NewMatch],
    ) -> Result<Vec<TournamentMatch>> {
        MatchRepository::new(&self.pool)
            .create_many(challenge_id, matches)
            .await
    }

    async fn update_match(&self, match_id: Uuid, update: &MatchUpdate) -> Result<TournamentMatch> {
        MatchRepository::new(&self.pool)
            .update(match_id, update)
            .await
    }

    async fn upsert_pick(
        &self,
        participant_id: Uuid,
        match_id: Uuid,
        round: i32,
        picked_player: &str,
    ) -> Result<Pick> {
        PickRepository::new(&self.pool)
            .upsert(participant_id, match_id, round, picked_player)
            .await
    }

    async fn get_picks(&self, participant_id: Uuid) -> Result<Vec<Pick>> {
        PickRepository::new(&self.pool)
            .list_for_participant(participant_id)
            .await
    }

    async fn find_participant(&self, challenge_id: Uuid, user_id: Uuid) -> Result<Participant> {
        ParticipantRepository::new(&self.pool)
            .find(challenge_id, user_id)
            .await
    }

    async fn add_participant(&self, challenge_id: Uuid, user_id: Uuid) -> Result<Participant> {
        ParticipantRepository::new(&self.pool)
            .add(challenge_id, user_id)
            .await
    }
}
