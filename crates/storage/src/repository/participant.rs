use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::Participant;

pub struct ParticipantRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ParticipantRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find(&self, challenge_id: Uuid, user_id: Uuid) -> Result<Participant> {
        let participant = sqlx::query_as::<_, Participant>(
            r#"
            SELECT participant_id, challenge_id, user_id, joined_at
            FROM participants
            WHERE challenge_id = $1 AND user_id = $2
            "#,
        )
        .bind(challenge_id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(participant)
    }

    /// Join a challenge; a second join returns the existing row
    pub async fn add(&self, challenge_id: Uuid, user_id: Uuid) -> Result<Participant> {
        sqlx::query(
            r#"
            INSERT INTO participants (challenge_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (challenge_id, user_id) DO NOTHING
            "#,
        )
        .bind(challenge_id)
        .bind(user_id)
        .execute(self.pool)
        .await
        .map_err(|e| {
            let err = StorageError::from(e);
            if err.is_foreign_key_violation() {
                StorageError::ConstraintViolation("Challenge does not exist".to_string())
            } else {
                err
            }
        })?;

        self.find(challenge_id, user_id).await
    }
}
