//! Error types for plan import and engine configuration.

use thiserror::Error;

/// Errors raised while loading plans or configuration.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Duplicate room id {id} on floor {floor}")]
    DuplicateRoomId { floor: String, id: String },
    #[error("Room {0} has non-finite geometry")]
    NonFiniteGeometry(String),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for plan operations.
pub type PlanResult<T> = Result<T, PlanError>;
