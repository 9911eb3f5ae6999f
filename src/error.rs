//! Error types for the circulation core

use thiserror::Error;

/// Constraint message for membership parsing failures.
pub const MEMBERSHIP_CONSTRAINTS: &str =
    "Membership status can only be: ACTIVE, EXPIRED, NON-MEMBER";

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Membership status can only be: ACTIVE, EXPIRED, NON-MEMBER")]
    InvalidMembership,

    #[error("Book '{0}' is already issued")]
    BookAlreadyIssued(String),

    #[error("Book '{0}' is not issued")]
    BookNotIssued(String),

    #[error("'{0}' is not a member and cannot borrow books")]
    IneligibleBorrower(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
