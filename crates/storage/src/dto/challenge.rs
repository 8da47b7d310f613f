use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Contestants of one first-round match; `null` leaves the slot to be filled in later.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct DrawMatchRequest {
    #[validate(length(min = 1, max = 255))]
    pub player1: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub player2: Option<String>,
}

/// Request payload for creating a new challenge
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateChallengeRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Tournament must be between 1 and 255 characters"
    ))]
    pub tournament: String,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,

    /// Round number of the first round in the draw
    #[validate(range(min = 1, max = 64, message = "First round must be between 1 and 64"))]
    #[serde(default = "default_first_round")]
    pub first_round: i32,

    /// First-round matches, left to right; its length must be a power of two
    #[validate(length(min = 1, message = "Draw needs at least one match"))]
    #[validate(nested)]
    pub draw: Vec<DrawMatchRequest>,
}

fn default_first_round() -> i32 {
    1
}

impl CreateChallengeRequest {
    /// Additional validation that requires multiple fields
    pub fn validate_dates(&self) -> Result<(), &'static str> {
        if self.end_date < self.start_date {
            return Err("End date must be on or after start date");
        }

        Ok(())
    }
}

/// Response containing challenge details
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChallengeResponse {
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

impl From<crate::models::Challenge> for ChallengeResponse {
    fn from(challenge: crate::models::Challenge) -> Self {
        Self {
            challenge_id: challenge.challenge_id,
            name: challenge.name,
            description: challenge.description,
            tournament: challenge.tournament,
            invite_code: challenge.invite_code,
            start_date: challenge.start_date,
            end_date: challenge.end_date,
            created_by: challenge.created_by,
            created_at: challenge.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateChallengeRequest {
        CreateChallengeRequest {
            name: "Office pool".to_string(),
            description: None,
            tournament: "Australian Open 2025".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 14).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 28).unwrap(),
            first_round: 5,
            draw: vec![DrawMatchRequest::default(); 4],
        }
    }

    #[test]
    fn test_valid_request() {
        let req = request();
        assert!(req.validate().is_ok());
        assert!(req.validate_dates().is_ok());
    }

    #[test]
    fn test_end_before_start() {
        let mut req = request();
        req.end_date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert!(req.validate_dates().is_err());
    }

    #[test]
    fn test_field_validation() {
        let mut req = request();
        req.name.clear();
        req.first_round = 0;
        req.draw[0].player1 = Some(String::new());

        let errors = req.validate().unwrap_err();
        let fields = errors.errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("first_round"));
        assert!(fields.contains_key("draw"));
    }
}
