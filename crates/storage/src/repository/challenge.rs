use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Challenge, NewChallenge};

const CHALLENGE_COLUMNS: &str = "challenge_id, name, description, tournament, invite_code, \
                                 start_date, end_date, created_by, created_at";

/// Repository for Challenge database operations
pub struct ChallengeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ChallengeRepository<'a> {
    /// Create a new ChallengeRepository
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a challenge by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Challenge> {
        let challenge = sqlx::query_as::<_, Challenge>(&format!(
            "SELECT {CHALLENGE_COLUMNS} FROM challenges WHERE challenge_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(challenge)
    }

    /// Get a challenge by its invite code
    pub async fn find_by_invite_code(&self, code: &str) -> Result<Challenge> {
        let challenge = sqlx::query_as::<_, Challenge>(&format!(
            "SELECT {CHALLENGE_COLUMNS} FROM challenges WHERE invite_code = $1"
        ))
        .bind(code)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(challenge)
    }

    /// Create a new challenge
    pub async fn create(&self, new: &NewChallenge) -> Result<Challenge> {
        let challenge = sqlx::query_as::<_, Challenge>(&format!(
            r#"
            INSERT INTO challenges (
                name, description, tournament, invite_code, start_date, end_date, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {CHALLENGE_COLUMNS}
            "#
        ))
        .bind(&new.name)
        .bind(&new.description)
        .bind(&new.tournament)
        .bind(&new.invite_code)
        .bind(new.start_date)
        .bind(new.end_date)
        .bind(new.created_by)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            // Handle unique constraint violations for invite_code
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.code().as_deref() == Some("23505") {
                    return StorageError::ConstraintViolation(
                        "Invite code already exists".to_string(),
                    );
                }
            }
            StorageError::from(e)
        })?;

        Ok(challenge)
    }
}
