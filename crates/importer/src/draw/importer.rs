use async_trait::async_trait;
use storage::models::{Actor, Challenge};
use storage::services::setup;
use uuid::Uuid;

use super::models::DrawFile;
use super::validator::DrawValidator;
use crate::traits::{ChallengeImporter, ImportContext};
use crate::Result;

/// Seeds a challenge and its full match grid from a draw file on disk.
#[derive(Debug, Default)]
pub struct DrawImporter {
    created_by: Option<Uuid>,
}

impl DrawImporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the challenge as `user_id` instead of the file's `created_by`.
    pub fn created_by(mut self, user_id: Option<Uuid>) -> Self {
        self.created_by = user_id;
        self
    }

    pub async fn load(path: &str) -> Result<DrawFile> {
        let json_content = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&json_content)?)
    }

    pub async fn import_draw(&self, draw: &DrawFile, context: &ImportContext) -> Result<Challenge> {
        let report = DrawValidator::validate(draw)?;
        report.log_warnings();

        let actor = Actor::new(self.created_by.unwrap_or(draw.created_by));
        let challenge =
            setup::create_challenge(context.store.as_ref(), &actor, &draw.to_request()).await?;

        tracing::info!(
            "Imported challenge '{}' with invite code {}",
            challenge.name,
            challenge.invite_code
        );

        Ok(challenge)
    }
}

#[async_trait]
impl ChallengeImporter for DrawImporter {
    async fn import(&self, identifier: &str, context: &ImportContext) -> Result<Challenge> {
        tracing::info!("Loading draw from: {}", identifier);
        let draw = Self::load(identifier).await?;
        self.import_draw(&draw, context).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::ImporterError;
    use storage::{BracketStore, MemoryStore};

    const SAMPLE: &str = include_str!("../../draws/ao2024_quarterfinals.json");

    #[tokio::test]
    async fn test_sample_seeds_quarter_finals_grid() {
        let store = Arc::new(MemoryStore::new());
        let context = ImportContext {
            store: store.clone(),
        };
        let draw: DrawFile = serde_json::from_str(SAMPLE).unwrap();

        let challenge = DrawImporter::new()
            .import_draw(&draw, &context)
            .await
            .unwrap();
        assert_eq!(challenge.created_by, draw.created_by);

        let matches = store
            .get_matches(challenge.challenge_id, None)
            .await
            .unwrap();
        assert_eq!(matches.len(), 7);
        assert_eq!(matches[0].round, 5);
        assert_eq!(matches[0].player1.as_deref(), Some("Novak Djokovic"));
        assert_eq!(matches[3].player2.as_deref(), Some("Alexander Zverev"));
        assert_eq!(matches[6].round, 7);

        assert!(
            store
                .find_participant(challenge.challenge_id, draw.created_by)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_created_by_override() {
        let context = ImportContext {
            store: Arc::new(MemoryStore::new()),
        };
        let draw: DrawFile = serde_json::from_str(SAMPLE).unwrap();
        let admin = Uuid::new_v4();

        let challenge = DrawImporter::new()
            .created_by(Some(admin))
            .import_draw(&draw, &context)
            .await
            .unwrap();
        assert_eq!(challenge.created_by, admin);
    }

    #[tokio::test]
    async fn test_invalid_draw_writes_nothing() {
        let context = ImportContext {
            store: Arc::new(MemoryStore::new()),
        };
        let mut draw: DrawFile = serde_json::from_str(SAMPLE).unwrap();
        draw.matches.pop();

        let err = DrawImporter::new()
            .import_draw(&draw, &context)
            .await
            .unwrap_err();
        assert!(matches!(err, ImporterError::ValidationError(_)));
    }
}
