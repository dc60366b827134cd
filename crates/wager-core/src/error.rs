use thiserror::Error;
use wager_db::DatabaseError;

/// Failure modes of the ledger-and-statistics engine.
///
/// Validation and authorization errors abort an operation with no partial
/// effect. `AlreadySettled` and `StorageConflict` mean a storage-level
/// conditional update found the row in a different state than expected;
/// callers must not assume their write happened. `NoActiveBankroll` is a
/// skipped side effect, never fatal to the settlement that triggered it.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("already settled: {0}")]
    AlreadySettled(String),
    #[error("no active bankroll for user {0}")]
    NoActiveBankroll(uuid::Uuid),
    #[error("storage conflict: {0}")]
    StorageConflict(String),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl EngineError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Map a db-layer NotFound onto a domain-level NotFound; transient pool
    /// and interaction failures surface as `StorageUnavailable` so callers
    /// know a retry with backoff is appropriate.
    pub fn from_db(err: DatabaseError, what: &str) -> Self {
        match err {
            DatabaseError::NotFound { .. } => Self::NotFound(what.to_string()),
            DatabaseError::PoolError { message, .. }
            | DatabaseError::InteractionError { message, .. } => {
                Self::StorageUnavailable(message)
            }
            other => Self::Database(other),
        }
    }
}
