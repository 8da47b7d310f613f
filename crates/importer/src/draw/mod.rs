pub mod importer;
pub mod models;
pub mod validator;

pub use importer::DrawImporter;
pub use models::DrawFile;
pub use validator::{DrawValidator, ValidationReport};
