//! Repository implementations using SeaORM

pub mod book_repository;
pub mod review_repository;
pub mod user_repository;

pub use book_repository::SeaOrmBookRepository;
pub use review_repository::SeaOrmReviewRepository;
pub use user_repository::SeaOrmUserRepository;

use sea_orm::{DbErr, SqlErr};

use crate::domain::DomainError;

/// Unique index violations become `Conflict`, everything else stays a database error
fn conflict_on_unique(err: DbErr, message: &str) -> DomainError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::debug!("Unique constraint violated: {}", detail);
            DomainError::Conflict(message.to_string())
        }
        _ => DomainError::from(err),
    }
}
