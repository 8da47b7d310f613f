use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

use super::setup::{create_challenge, join_challenge};
use crate::dto::challenge::{CreateChallengeRequest, DrawMatchRequest};
use crate::memory::MemoryStore;
use crate::models::{Actor, TournamentMatch};
use crate::store::BracketStore;

pub fn days_after(days: i64) -> NaiveDate {
    Utc::now().date_naive() + Duration::days(days)
}

pub fn days_before(days: i64) -> NaiveDate {
    Utc::now().date_naive() - Duration::days(days)
}

/// A request whose first round pairs `names` two by two.
pub fn draw_request(names: &[&str], start: NaiveDate) -> CreateChallengeRequest {
    CreateChallengeRequest {
        name: "Office pool".to_string(),
        description: None,
        tournament: "Australian Open".to_string(),
        start_date: start,
        end_date: start + Duration::days(14),
        first_round: 1,
        draw: names
            .chunks(2)
            .map(|pair| DrawMatchRequest {
                player1: pair.first().map(|p| p.to_string()),
                player2: pair.get(1).map(|p| p.to_string()),
            })
            .collect(),
    }
}

/// An eight-entrant challenge (A..H) owned by `admin`, joined by `player`.
pub struct Fixture {
    pub store: MemoryStore,
    pub admin: Actor,
    pub player: Actor,
    pub challenge_id: Uuid,
}

impl Fixture {
    pub async fn eight(start: NaiveDate) -> Self {
        let store = MemoryStore::new();
        let admin = Actor::new(Uuid::new_v4());
        let player = Actor::new(Uuid::new_v4());

        let challenge = create_challenge(&store, &admin, &eight_request(start))
            .await
            .unwrap();
        join_challenge(&store, &player, &challenge.invite_code)
            .await
            .unwrap();

        Self {
            store,
            admin,
            player,
            challenge_id: challenge.challenge_id,
        }
    }

    /// A second eight-entrant challenge in the same store, owned by `admin`.
    pub async fn create_eight(&self, start: NaiveDate) -> Uuid {
        create_challenge(&self.store, &self.admin, &eight_request(start))
            .await
            .unwrap()
            .challenge_id
    }

    pub async fn match_at(&self, round: i32, position: i32) -> TournamentMatch {
        self.match_in(self.challenge_id, round, position).await
    }

    pub async fn match_in(&self, challenge_id: Uuid, round: i32, position: i32) -> TournamentMatch {
        self.store
            .find_match(challenge_id, round, position)
            .await
            .unwrap()
    }
}

fn eight_request(start: NaiveDate) -> CreateChallengeRequest {
    draw_request(&["A", "B", "C", "D", "E", "F", "G", "H"], start)
}
