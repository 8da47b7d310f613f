use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::Pick;

pub struct PickRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PickRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_participant(&self, participant_id: Uuid) -> Result<Vec<Pick>> {
        let picks = sqlx::query_as::<_, Pick>(
            r#"
            SELECT pick_id, participant_id, match_id, round, picked_player, points,
                   created_at, updated_at
            FROM picks
            WHERE participant_id = $1
            ORDER BY round, created_at, pick_id
            "#,
        )
        .bind(participant_id)
        .fetch_all(self.pool)
        .await?;

        Ok(picks)
    }

    /// One row per (participant, match); later calls overwrite the pick
    pub async fn upsert(
        &self,
        participant_id: Uuid,
        match_id: Uuid,
        round: i32,
        picked_player: &str,
    ) -> Result<Pick> {
        let pick = sqlx::query_as::<_, Pick>(
            r#"
            INSERT INTO picks (participant_id, match_id, round, picked_player)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (participant_id, match_id) DO UPDATE
            SET picked_player = EXCLUDED.picked_player,
                round = EXCLUDED.round,
                updated_at = NOW()
            RETURNING pick_id, participant_id, match_id, round, picked_player, points,
                      created_at, updated_at
            "#,
        )
        .bind(participant_id)
        .bind(match_id)
        .bind(round)
        .bind(picked_player)
        .fetch_one(self.pool)
        .await?;

        Ok(pick)
    }
}
