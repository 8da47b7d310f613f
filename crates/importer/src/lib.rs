pub mod draw;
pub mod error;
pub mod traits;

pub use draw::{DrawFile, DrawImporter, DrawValidator, ValidationReport};
pub use error::{ImporterError, Result};
pub use traits::{ChallengeImporter, ImportContext};
