//! Services Layer
//!
//! This module contains pure business logic extracted from HTTP handlers.
//! Services take repository trait objects, so they can be called from the
//! Axum handlers, the seed routine or tests.

pub mod book_service;
pub mod review_service;
pub mod user_service;

// Re-export for convenience
pub use book_service::{BookDetail, BookPage};
pub use user_service::AuthResponse;
