use thiserror::Error;

use crate::models::leave::LeaveType;

#[derive(Error, Debug)]
pub enum HrError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(
        "Insufficient {leave_type} leave balance. Available: {available} days. Requested: {requested} days."
    )]
    InsufficientBalance {
        leave_type: LeaveType,
        available: i32,
        requested: i32,
    },

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type HrResult<T> = Result<T, HrError>;

impl HrError {
    /// Generic authorization failure; callers never learn why the relationship check failed.
    pub fn unauthorized() -> Self {
        HrError::Authorization("Unauthorized action".to_string())
    }

    pub fn not_pending(kind: &str, status: impl std::fmt::Display) -> Self {
        HrError::Conflict(format!("{kind} is already {status}"))
    }
}
