use crate::dto::ApiResponse;
use axum::{Json, http::StatusCode, response::IntoResponse};
use thiserror::Error;

use wager_core::EngineError;
use wager_db::DatabaseError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Database error: {0}")]
    DbError(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("Internal server error")]
    InternalServerError,
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::NotFound(what) => Self::NotFound(format!("{what} not found")),
            EngineError::Forbidden(msg) => Self::Forbidden(msg),
            EngineError::InvalidInput(msg) => Self::BadRequest(msg),
            EngineError::AlreadySettled(what) => Self::Conflict(format!("{what} already settled")),
            EngineError::NoActiveBankroll(user_id) => {
                Self::Conflict(format!("user {user_id} has no active bankroll"))
            }
            EngineError::StorageConflict(msg) => Self::Conflict(msg),
            EngineError::StorageUnavailable(msg) => Self::ServiceUnavailable(msg),
            EngineError::Database(db) => db.into(),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound { operation } => {
                Self::NotFound(format!("no record for {operation}"))
            }
            DatabaseError::UniqueViolation { operation, .. } => {
                Self::Conflict(format!("duplicate record in {operation}"))
            }
            DatabaseError::PoolError { message, .. }
            | DatabaseError::InteractionError { message, .. } => {
                tracing::error!("Database unavailable: {message}");
                Self::ServiceUnavailable("database unavailable".to_string())
            }
            other => {
                tracing::error!("Database error in '{}': {other}", other.operation());
                Self::DbError("database error".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, msg) = match self {
            Self::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            Self::DbError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Self::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            Self::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };
        let response: ApiResponse<()> = ApiResponse::error(msg);
        (status, Json(response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settlement_race_maps_to_conflict() {
        let err: ApiError = EngineError::AlreadySettled("bet 42".to_string()).into();
        assert!(matches!(err, ApiError::Conflict(_)));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn storage_unavailable_maps_to_503() {
        let err: ApiError = EngineError::StorageUnavailable("pool exhausted".to_string()).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
