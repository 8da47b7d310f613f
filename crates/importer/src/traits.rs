use std::sync::Arc;

use crate::Result;
use storage::BracketStore;
use storage::models::Challenge;

pub struct ImportContext {
    pub store: Arc<dyn BracketStore>,
}

#[async_trait::async_trait]
pub trait ChallengeImporter: Send + Sync {
    async fn import(&self, identifier: &str, context: &ImportContext) -> Result<Challenge>;
}
