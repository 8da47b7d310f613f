use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Challenge {
    pub challenge_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub tournament: String,
    pub invite_code: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_by: Uuid,
    pub created_at: NaiveDateTime,
}

/// Row values for a challenge about to be inserted.
#[derive(Debug, Clone)]
pub struct NewChallenge {
    pub name: String,
    pub description: Option<String>,
    pub tournament: String,
    pub invite_code: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_by: Uuid,
}

impl Challenge {
    /// Picks freeze at midnight UTC of the start date.
    pub fn locks_at(&self) -> DateTime<Utc> {
        self.start_date.and_time(NaiveTime::MIN).and_utc()
    }

    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        now >= self.locks_at()
    }

    pub fn is_admin(&self, user_id: Uuid) -> bool {
        self.created_by == user_id
    }
}
