use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{
    Challenge, MatchUpdate, NewChallenge, NewMatch, Participant, Pick, Slot, TournamentMatch,
};
use crate::store::BracketStore;

#[derive(Default)]
struct Tables {
    challenges: HashMap<Uuid, Challenge>,
    matches: HashMap<Uuid, TournamentMatch>,
    participants: HashMap<(Uuid, Uuid), Participant>,
    picks: HashMap<(Uuid, Uuid), Pick>,
}

/// Process-local [`BracketStore`] with the same key constraints as the database.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl BracketStore for MemoryStore {
    async fn get_challenge(&self, challenge_id: Uuid) -> Result<Challenge> {
        self.tables()
            .challenges
            .get(&challenge_id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn find_challenge_by_invite_code(&self, invite_code: &str) -> Result<Challenge> {
        self.tables()
            .challenges
            .values()
            .find(|c| c.invite_code == invite_code)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn insert_challenge(&self, challenge: &NewChallenge) -> Result<Challenge> {
        let mut tables = self.tables();

        if tables
            .challenges
            .values()
            .any(|c| c.invite_code == challenge.invite_code)
        {
            return Err(StorageError::ConstraintViolation(
                "Invite code already exists".to_string(),
            ));
        }

        let row = Challenge {
            challenge_id: Uuid::new_v4(),
            name: challenge.name.clone(),
            description: challenge.description.clone(),
            tournament: challenge.tournament.clone(),
            invite_code: challenge.invite_code.clone(),
            start_date: challenge.start_date,
            end_date: challenge.end_date,
            created_by: challenge.created_by,
            created_at: Utc::now().naive_utc(),
        };
        tables.challenges.insert(row.challenge_id, row.clone());

        Ok(row)
    }

    async fn get_matches(
        &self,
        challenge_id: Uuid,
        round: Option<i32>,
    ) -> Result<Vec<TournamentMatch>> {
        let mut matches: Vec<TournamentMatch> = self
            .tables()
            .matches
            .values()
            .filter(|m| m.challenge_id == challenge_id)
            .filter(|m| round.is_none_or(|r| m.round == r))
            .cloned()
            .collect();
        matches.sort_by_key(|m| (m.round, m.position));

        Ok(matches)
    }

    async fn get_match(&self, match_id: Uuid) -> Result<TournamentMatch> {
        self.tables()
            .matches
            .get(&match_id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn find_match(
        &self,
        challenge_id: Uuid,
        round: i32,
        position: i32,
    ) -> Result<TournamentMatch> {
        self.tables()
            .matches
            .values()
            .find(|m| m.challenge_id == challenge_id && m.round == round && m.position == position)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn insert_matches(
        &self,
        challenge_id: Uuid,
        matches: &[NewMatch],
    ) -> Result<Vec<TournamentMatch>> {
        let mut tables = self.tables();

        if !tables.challenges.contains_key(&challenge_id) {
            return Err(StorageError::ConstraintViolation(
                "Challenge does not exist".to_string(),
            ));
        }

        let taken = |round: i32, position: i32, tables: &Tables| {
            tables.matches.values().any(|m| {
                m.challenge_id == challenge_id && m.round == round && m.position == position
            })
        };
        if matches.iter().any(|m| taken(m.round, m.position, &*tables)) {
            return Err(StorageError::ConstraintViolation(
                "Match slot already exists".to_string(),
            ));
        }

        let now = Utc::now().naive_utc();
        let rows: Vec<TournamentMatch> = matches
            .iter()
            .map(|m| TournamentMatch {
                match_id: Uuid::new_v4(),
                challenge_id,
                round: m.round,
                position: m.position,
                player1: m.player1.clone(),
                player2: m.player2.clone(),
                winner: None,
                status: crate::models::MatchStatus::Pending,
                updated_at: now,
            })
            .collect();

        for row in &rows {
            tables.matches.insert(row.match_id, row.clone());
        }

        Ok(rows)
    }

    async fn update_match(&self, match_id: Uuid, update: &MatchUpdate) -> Result<TournamentMatch> {
        let mut tables = self.tables();
        let row = tables
            .matches
            .get_mut(&match_id)
            .ok_or(StorageError::NotFound)?;

        match update {
            MatchUpdate::Slot { slot, player } => match slot {
                Slot::Player1 => row.player1 = player.clone(),
                Slot::Player2 => row.player2 = player.clone(),
            },
            MatchUpdate::Players { player1, player2 } => {
                row.player1 = player1.clone();
                row.player2 = player2.clone();
            }
            MatchUpdate::Result { winner, status } => {
                row.winner = winner.clone();
                row.status = *status;
            }
        }
        row.updated_at = Utc::now().naive_utc();

        Ok(row.clone())
    }

    async fn upsert_pick(
        &self,
        participant_id: Uuid,
        match_id: Uuid,
        round: i32,
        picked_player: &str,
    ) -> Result<Pick> {
        let mut tables = self.tables();
        let now = Utc::now().naive_utc();

        let pick = tables
            .picks
            .entry((participant_id, match_id))
            .and_modify(|p| {
                p.picked_player = picked_player.to_string();
                p.round = round;
                p.updated_at = now;
            })
            .or_insert_with(|| Pick {
                pick_id: Uuid::new_v4(),
                participant_id,
                match_id,
                round,
                picked_player: picked_player.to_string(),
                points: None,
                created_at: now,
                updated_at: now,
            });

        Ok(pick.clone())
    }

    async fn get_picks(&self, participant_id: Uuid) -> Result<Vec<Pick>> {
        let mut picks: Vec<Pick> = self
            .tables()
            .picks
            .values()
            .filter(|p| p.participant_id == participant_id)
            .cloned()
            .collect();
        picks.sort_by_key(|p| (p.round, p.created_at, p.pick_id));

        Ok(picks)
    }

    async fn find_participant(&self, challenge_id: Uuid, user_id: Uuid) -> Result<Participant> {
        self.tables()
            .participants
            .get(&(challenge_id, user_id))
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn add_participant(&self, challenge_id: Uuid, user_id: Uuid) -> Result<Participant> {
        let mut tables = self.tables();

        if !tables.challenges.contains_key(&challenge_id) {
            return Err(StorageError::ConstraintViolation(
                "Challenge does not exist".to_string(),
            ));
        }

        let participant = tables
            .participants
            .entry((challenge_id, user_id))
            .or_insert_with(|| Participant {
                participant_id: Uuid::new_v4(),
                challenge_id,
                user_id,
                joined_at: Utc::now().naive_utc(),
            });

        Ok(participant.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    async fn seeded() -> (MemoryStore, Challenge) {
        let store = MemoryStore::new();
        let challenge = store
            .insert_challenge(&NewChallenge {
                name: "Pool".to_string(),
                description: None,
                tournament: "AO".to_string(),
                invite_code: "CODE0001".to_string(),
                start_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2030, 1, 14).unwrap(),
                created_by: Uuid::new_v4(),
            })
            .await
            .unwrap();
        (store, challenge)
    }

    #[tokio::test]
    async fn test_upsert_pick_overwrites() {
        let (store, _) = seeded().await;
        let participant_id = Uuid::new_v4();
        let match_id = Uuid::new_v4();

        let first = store
            .upsert_pick(participant_id, match_id, 1, "A")
            .await
            .unwrap();
        let second = store
            .upsert_pick(participant_id, match_id, 1, "B")
            .await
            .unwrap();

        assert_eq!(first.pick_id, second.pick_id);
        let picks = store.get_picks(participant_id).await.unwrap();
        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].picked_player, "B");
    }

    #[tokio::test]
    async fn test_add_participant_is_idempotent() {
        let (store, challenge) = seeded().await;
        let user = Uuid::new_v4();

        let a = store
            .add_participant(challenge.challenge_id, user)
            .await
            .unwrap();
        let b = store
            .add_participant(challenge.challenge_id, user)
            .await
            .unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_duplicate_invite_code_rejected() {
        let (store, challenge) = seeded().await;
        let err = store
            .insert_challenge(&NewChallenge {
                name: "Other".to_string(),
                description: None,
                tournament: "AO".to_string(),
                invite_code: challenge.invite_code.clone(),
                start_date: challenge.start_date,
                end_date: challenge.end_date,
                created_by: Uuid::new_v4(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn test_matches_filtered_and_ordered() {
        let (store, challenge) = seeded().await;
        let new = [
            NewMatch { round: 2, position: 0, player1: None, player2: None },
            NewMatch { round: 1, position: 1, player1: None, player2: None },
            NewMatch { round: 1, position: 0, player1: None, player2: None },
        ];
        store
            .insert_matches(challenge.challenge_id, &new)
            .await
            .unwrap();

        let all = store
            .get_matches(challenge.challenge_id, None)
            .await
            .unwrap();
        let coords: Vec<(i32, i32)> = all.iter().map(|m| (m.round, m.position)).collect();
        assert_eq!(coords, vec![(1, 0), (1, 1), (2, 0)]);

        let round_two = store
            .get_matches(challenge.challenge_id, Some(2))
            .await
            .unwrap();
        assert_eq!(round_two.len(), 1);

        assert!(matches!(
            store.find_match(challenge.challenge_id, 3, 0).await,
            Err(StorageError::NotFound)
        ));
    }
}
