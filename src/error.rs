//! Service and HTTP error taxonomies.

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::dao::storage::StorageError;

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage backend is unavailable.
    #[error("storage unavailable")]
    Unavailable(#[source] StorageError),
    /// Application is running in degraded mode without storage.
    #[error("storage unavailable (degraded mode)")]
    Degraded,
    /// A player with the same name already exists.
    #[error("player name `{0}` is already taken")]
    DuplicateName(String),
    /// The participant list of a game is malformed.
    #[error("invalid participants: {0}")]
    InvalidParticipants(String),
    /// The winner index does not select one of the two participants.
    #[error("winner index {0} is out of range (expected 0 or 1)")]
    InvalidWinnerIndex(usize),
    /// Invalid input provided by the client.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Operation cannot be performed in the current game state.
    #[error("invalid state: {0}")]
    InvalidState(String),
    /// Requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::DuplicateName { name } => ServiceError::DuplicateName(name),
            other => ServiceError::Unavailable(other),
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(err: ValidationErrors) -> Self {
        ServiceError::InvalidInput(format!("validation failed: {err}"))
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Requested resource not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// Conflict with current state.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Service unavailable or degraded.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Unavailable(source) => AppError::ServiceUnavailable(source.to_string()),
            ServiceError::Degraded => AppError::ServiceUnavailable("degraded mode".into()),
            ServiceError::DuplicateName(name) => {
                AppError::Conflict(format!("player name `{name}` is already taken"))
            }
            ServiceError::InvalidParticipants(message) => AppError::BadRequest(message),
            ServiceError::InvalidWinnerIndex(index) => {
                AppError::BadRequest(format!("winner index {index} is out of range"))
            }
            ServiceError::InvalidInput(message) => AppError::BadRequest(message),
            ServiceError::InvalidState(message) => AppError::Conflict(message),
            ServiceError::NotFound(message) => AppError::NotFound(message),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let payload = Json(ErrorBody {
            message: self.to_string(),
        });

        (status, payload).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_name_maps_to_conflict() {
        let err: AppError = ServiceError::DuplicateName("foo".into()).into();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn invalid_state_maps_to_conflict() {
        let err: AppError = ServiceError::InvalidState("already cancelled".into()).into();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn participant_and_index_errors_map_to_bad_request() {
        let err: AppError = ServiceError::InvalidParticipants("got 3".into()).into();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err: AppError = ServiceError::InvalidWinnerIndex(2).into();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn degraded_maps_to_service_unavailable() {
        let err: AppError = ServiceError::Degraded.into();
        assert!(matches!(err, AppError::ServiceUnavailable(_)));
    }
}
