use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use storage::error::{BracketError, StorageError};
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Bracket(BracketError),
    Validation(ValidationErrors),
    Unauthorized,
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bracket(e) => write!(f, "Bracket error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::Unauthorized => write!(f, "Unauthorized"),
        }
    }
}

impl WebError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Bracket(e) => match e {
                BracketError::NotFound => StatusCode::NOT_FOUND,
                BracketError::Forbidden => StatusCode::FORBIDDEN,
                BracketError::ChallengeLocked => StatusCode::LOCKED,
                BracketError::InvalidWinner { .. } | BracketError::InvalidPlayers(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                BracketError::MatchCompleted => StatusCode::CONFLICT,
                BracketError::InvalidRequest(_) | BracketError::Validation(_) => {
                    StatusCode::BAD_REQUEST
                }
                BracketError::InvalidBracket(_) | BracketError::Persistence(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let body = match &self {
            Self::Bracket(BracketError::NotFound) => {
                json!({
                    "error": "Resource not found"
                })
            }
            Self::Bracket(e @ (BracketError::InvalidBracket(_) | BracketError::Persistence(_))) => {
                tracing::error!("Bracket operation failed: {:?}", e);
                json!({
                    "error": "An internal error occurred"
                })
            }
            Self::Bracket(BracketError::Validation(errors)) | Self::Validation(errors) => {
                json!({
                    "error": "Validation failed",
                    "details": field_errors(errors)
                })
            }
            Self::Bracket(e) => {
                json!({
                    "error": e.to_string()
                })
            }
            Self::Unauthorized => {
                json!({
                    "error": "Unauthorized"
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

fn field_errors(errors: &ValidationErrors) -> Vec<String> {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                format!(
                    "{}: {}",
                    field,
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                )
            })
        })
        .collect()
}

impl From<BracketError> for WebError {
    fn from(error: BracketError) -> Self {
        Self::Bracket(error)
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Bracket(error.into())
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (WebError::from(BracketError::NotFound), StatusCode::NOT_FOUND),
            (WebError::from(BracketError::Forbidden), StatusCode::FORBIDDEN),
            (WebError::from(BracketError::ChallengeLocked), StatusCode::LOCKED),
            (
                WebError::from(BracketError::InvalidWinner {
                    winner: "X".to_string(),
                }),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (WebError::from(BracketError::MatchCompleted), StatusCode::CONFLICT),
            (
                WebError::from(BracketError::InvalidRequest("x".to_string())),
                StatusCode::BAD_REQUEST,
            ),
            (
                WebError::from(BracketError::Validation(ValidationErrors::new())),
                StatusCode::BAD_REQUEST,
            ),
            (
                WebError::from(StorageError::ConstraintViolation("x".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (WebError::from(StorageError::NotFound), StatusCode::NOT_FOUND),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
