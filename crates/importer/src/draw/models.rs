use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use storage::dto::challenge::{CreateChallengeRequest, DrawMatchRequest};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawFile {
    pub format_version: String,
    pub challenge: ChallengeData,
    pub created_by: Uuid,
    #[serde(default = "default_first_round")]
    pub first_round: i32,
    pub matches: Vec<DrawMatch>,
}

fn default_first_round() -> i32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeData {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tournament: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// A first-round match; an absent player is decided later (qualifier, TBD).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawMatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player1: Option<PlayerData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player2: Option<PlayerData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerData {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
}

impl DrawMatch {
    pub fn players(&self) -> impl Iterator<Item = &PlayerData> {
        self.player1.iter().chain(self.player2.iter())
    }
}

impl DrawFile {
    pub fn to_request(&self) -> CreateChallengeRequest {
        CreateChallengeRequest {
            name: self.challenge.name.clone(),
            description: self.challenge.description.clone(),
            tournament: self.challenge.tournament.clone(),
            start_date: self.challenge.start_date,
            end_date: self.challenge.end_date,
            first_round: self.first_round,
            draw: self
                .matches
                .iter()
                .map(|m| DrawMatchRequest {
                    player1: m.player1.as_ref().map(|p| p.name.trim().to_string()),
                    player2: m.player2.as_ref().map(|p| p.name.trim().to_string()),
                })
                .collect(),
        }
    }
}
