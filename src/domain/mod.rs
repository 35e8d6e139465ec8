//! Domain layer - catalogue rules independent of HTTP and storage
//!
//! Value types (ids, ratings, pages), input validation, ownership checks,
//! repository traits and the error type every layer reports through.

pub mod errors;
pub mod ids;
pub mod inputs;
pub mod ownership;
pub mod pagination;
pub mod rating;
pub mod repositories;

pub use errors::DomainError;
pub use ids::{BookId, ReviewId, UserId};
pub use inputs::*;
pub use pagination::{DEFAULT_PAGE_SIZE, PageRequest, total_pages};
pub use rating::{Rating, average_rating};
pub use repositories::*;
