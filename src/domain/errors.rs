//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.
//! The api layer decides which status code each one maps to.

use std::fmt;

pub const DUPLICATE_REVIEW: &str = "You have already reviewed this book";
pub const DUPLICATE_EMAIL: &str = "User already exists";

#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Resource not found, with a client-facing message
    NotFound(String),
    /// Caller could not be identified (bad credentials, no token)
    Unauthenticated(String),
    /// Requester is not the owner of the resource
    Unauthorized(String),
    /// Requester is known but the action is not allowed for them
    Forbidden(String),
    /// Validation error with message
    Validation(String),
    /// Uniqueness rule violated (duplicate review, duplicate email)
    Conflict(String),
    /// Database/persistence error
    Database(String),
    /// Generic internal error
    Internal(String),
}

impl DomainError {
    pub fn not_found(what: &str) -> Self {
        DomainError::NotFound(format!("{} not found", what))
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    /// Whether the message may be shown to the client verbatim
    pub fn is_expected(&self) -> bool {
        !matches!(self, DomainError::Database(_) | DomainError::Internal(_))
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::NotFound(msg)
            | DomainError::Unauthenticated(msg)
            | DomainError::Unauthorized(msg)
            | DomainError::Forbidden(msg)
            | DomainError::Validation(msg)
            | DomainError::Conflict(msg) => write!(f, "{}", msg),
            DomainError::Database(msg) => write!(f, "Database error: {}", msg),
            DomainError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Database(e.to_string())
    }
}
