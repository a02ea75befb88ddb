//! Ledger error type and its HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Invalid game mode: {0}")]
    InvalidMode(String),

    #[error("{0} is full")]
    Capacity(String),

    #[error("User {user_id} is already a member of {target}")]
    AlreadyMember { user_id: String, target: String },

    #[error("User {user_id} is not a player in match {match_id}")]
    NotParticipant { match_id: String, user_id: String },

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl LedgerError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::InvalidMode(_) => "INVALID_MODE",
            Self::Capacity(_) => "CAPACITY_EXCEEDED",
            Self::AlreadyMember { .. } => "ALREADY_MEMBER",
            Self::NotParticipant { .. } => "NOT_PARTICIPANT",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Conflict(_) => "CONFLICT",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidMode(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Capacity(_) | Self::AlreadyMember { .. } | Self::Conflict(_) => {
                StatusCode::CONFLICT
            }
            Self::NotParticipant { .. } | Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Serialization(_) | Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Backend failures are logged in full but reported generically
        let message = match &self {
            LedgerError::Storage(e) => {
                tracing::error!("Storage error: {:#}", e);
                "A storage error occurred".to_string()
            }
            LedgerError::Serialization(e) => {
                tracing::error!("Serialization error: {}", e);
                "Stored data could not be decoded".to_string()
            }
            _ => self.to_string(),
        };

        let body = ErrorResponse {
            error: ErrorDetails {
                code: self.error_code().to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for LedgerError {
    fn from(err: validator::ValidationErrors) -> Self {
        LedgerError::Validation(err.to_string())
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_kinds_to_status_codes() {
        assert_eq!(
            LedgerError::not_found("Match", "m1").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            LedgerError::Capacity("Team".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            LedgerError::InvalidMode("blitz".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            LedgerError::Storage(anyhow::anyhow!("down")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_message_names_entity() {
        let err = LedgerError::not_found("Tournament", "t-9");
        assert_eq!(err.to_string(), "Tournament not found: t-9");
        assert_eq!(err.error_code(), "NOT_FOUND");
    }
}
