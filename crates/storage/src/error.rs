use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23503")
        )
    }
}

/// Failures of the bracket operations (picks, results, setup).
///
/// Validation variants are raised before anything is written.
#[derive(Debug, Error)]
pub enum BracketError {
    #[error("Challenge is locked, picks can no longer change")]
    ChallengeLocked,

    #[error("'{winner}' is not a contestant of this match")]
    InvalidWinner { winner: String },

    #[error("Invalid players: {0}")]
    InvalidPlayers(String),

    #[error("Match already has a declared result")]
    MatchCompleted,

    #[error("Not found")]
    NotFound,

    #[error("Only the challenge creator can do this")]
    Forbidden,

    #[error("Invalid bracket: {0}")]
    InvalidBracket(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Persistence failure: {0}")]
    Persistence(StorageError),
}

impl From<StorageError> for BracketError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::NotFound => Self::NotFound,
            other => Self::Persistence(other),
        }
    }
}

pub type BracketResult<T> = std::result::Result<T, BracketError>;
