use std::sync::Arc;

use axum::{Router, response::Response};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::Value;
use storage::{
    BracketStore, MemoryStore,
    dto::challenge::{CreateChallengeRequest, DrawMatchRequest},
    models::{Actor, TournamentMatch},
    services::setup,
};
use uuid::Uuid;

use crate::features::api_router;
use crate::middleware::auth::{Claims, JwtAuth};
use crate::state::AppState;

const SECRET: &str = "test-secret";

/// Router over a seeded in-memory store: eight entrants A..H owned by `admin`,
/// joined by `player`.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub admin: Uuid,
    pub player: Uuid,
    pub challenge_id: Uuid,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::starting_in(7).await
    }

    /// A challenge whose start date has passed.
    pub async fn started() -> Self {
        Self::starting_in(-1).await
    }

    async fn starting_in(days: i64) -> Self {
        let store = Arc::new(MemoryStore::new());
        let admin = Uuid::new_v4();
        let player = Uuid::new_v4();
        let start = Utc::now().date_naive() + Duration::days(days);

        let request = CreateChallengeRequest {
            name: "Office pool".to_string(),
            description: None,
            tournament: "Australian Open".to_string(),
            start_date: start,
            end_date: start + Duration::days(14),
            first_round: 1,
            draw: ["A", "B", "C", "D", "E", "F", "G", "H"]
                .chunks(2)
                .map(|pair| DrawMatchRequest {
                    player1: Some(pair[0].to_string()),
                    player2: Some(pair[1].to_string()),
                })
                .collect(),
        };
        let challenge = setup::create_challenge(store.as_ref(), &Actor::new(admin), &request)
            .await
            .unwrap();
        setup::join_challenge(store.as_ref(), &Actor::new(player), &challenge.invite_code)
            .await
            .unwrap();

        let state = AppState::new(store.clone(), JwtAuth::new(SECRET, None));

        Self {
            router: api_router(state),
            store,
            admin,
            player,
            challenge_id: challenge.challenge_id,
        }
    }

    pub async fn match_at(&self, round: i32, position: i32) -> TournamentMatch {
        self.store
            .find_match(self.challenge_id, round, position)
            .await
            .unwrap()
    }

    pub fn bearer(&self, user_id: Uuid) -> String {
        let claims = Claims {
            sub: user_id,
            exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
            aud: None,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        format!("Bearer {}", token)
    }
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap()
}
