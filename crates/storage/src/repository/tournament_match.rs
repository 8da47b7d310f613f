use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{MatchUpdate, NewMatch, Slot, TournamentMatch};

const MATCH_COLUMNS: &str =
    "match_id, challenge_id, round, position, player1, player2, winner, status, updated_at";

/// Repository for TournamentMatch database operations
pub struct MatchRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MatchRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a challenge's matches, optionally for a single round
    pub async fn list(&self, challenge_id: Uuid, round: Option<i32>) -> Result<Vec<TournamentMatch>> {
        let matches = sqlx::query_as::<_, TournamentMatch>(&format!(
            r#"
            SELECT {MATCH_COLUMNS}
            FROM tournament_matches
            WHERE challenge_id = $1
              AND ($2::INT IS NULL OR round = $2)
            ORDER BY round, position
            "#
        ))
        .bind(challenge_id)
        .bind(round)
        .fetch_all(self.pool)
        .await?;

        Ok(matches)
    }

    pub async fn find_by_id(&self, match_id: Uuid) -> Result<TournamentMatch> {
        let found = sqlx::query_as::<_, TournamentMatch>(&format!(
            "SELECT {MATCH_COLUMNS} FROM tournament_matches WHERE match_id = $1"
        ))
        .bind(match_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(found)
    }

    pub async fn find_at(
        &self,
        challenge_id: Uuid,
        round: i32,
        position: i32,
    ) -> Result<TournamentMatch> {
        let found = sqlx::query_as::<_, TournamentMatch>(&format!(
            r#"
            SELECT {MATCH_COLUMNS}
            FROM tournament_matches
            WHERE challenge_id = $1 AND round = $2 AND position = $3
            "#
        ))
        .bind(challenge_id)
        .bind(round)
        .bind(position)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(found)
    }

    /// Insert every slot of a new bracket in one statement
    pub async fn create_many(
        &self,
        challenge_id: Uuid,
        matches: &[NewMatch],
    ) -> Result<Vec<TournamentMatch>> {
        if matches.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO tournament_matches (challenge_id, round, position, player1, player2, status) ",
        );
        builder.push_values(matches, |mut row, m| {
            row.push_bind(challenge_id)
                .push_bind(m.round)
                .push_bind(m.position)
                .push_bind(m.player1.clone())
                .push_bind(m.player2.clone())
                .push_bind("pending");
        });
        builder.push(format!(" RETURNING {MATCH_COLUMNS}"));

        let mut created = builder
            .build_query_as::<TournamentMatch>()
            .fetch_all(self.pool)
            .await
            .map_err(|e| {
                let err = StorageError::from(e);
                if err.is_unique_violation() {
                    StorageError::ConstraintViolation("Match slot already exists".to_string())
                } else if err.is_foreign_key_violation() {
                    StorageError::ConstraintViolation("Challenge does not exist".to_string())
                } else {
                    err
                }
            })?;
        created.sort_by_key(|m| (m.round, m.position));

        Ok(created)
    }

    pub async fn update(&self, match_id: Uuid, update: &MatchUpdate) -> Result<TournamentMatch> {
        let query = match update {
            MatchUpdate::Slot { slot, player } => {
                let column = match slot {
                    Slot::Player1 => "player1",
                    Slot::Player2 => "player2",
                };
                sqlx::query_as::<_, TournamentMatch>(&format!(
                    r#"
                    UPDATE tournament_matches
                    SET {column} = $2, updated_at = NOW()
                    WHERE match_id = $1
                    RETURNING {MATCH_COLUMNS}
                    "#
                ))
                .bind(match_id)
                .bind(player.clone())
                .fetch_optional(self.pool)
                .await?
            }
            MatchUpdate::Players { player1, player2 } => {
                sqlx::query_as::<_, TournamentMatch>(&format!(
                    r#"
                    UPDATE tournament_matches
                    SET player1 = $2, player2 = $3, updated_at = NOW()
                    WHERE match_id = $1
                    RETURNING {MATCH_COLUMNS}
                    "#
                ))
                .bind(match_id)
                .bind(player1.clone())
                .bind(player2.clone())
                .fetch_optional(self.pool)
                .await?
            }
            MatchUpdate::Result { winner, status } => {
                sqlx::query_as::<_, TournamentMatch>(&format!(
                    r#"
                    UPDATE tournament_matches
                    SET winner = $2, status = $3, updated_at = NOW()
                    WHERE match_id = $1
                    RETURNING {MATCH_COLUMNS}
                    "#
                ))
                .bind(match_id)
                .bind(winner.clone())
                .bind(status.as_str())
                .fetch_optional(self.pool)
                .await?
            }
        };

        query.ok_or(StorageError::NotFound)
    }
}
