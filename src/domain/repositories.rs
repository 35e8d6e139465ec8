//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;

use super::{BookId, DomainError, NewBook, NewReview, PageRequest, ReviewId, UserId};
use crate::models::{Book, Review, ReviewWithUser, User};

/// One page of books with the total catalogue size
#[derive(Debug)]
pub struct PaginatedBooks {
    pub books: Vec<Book>,
    pub total: u64,
}

/// User row including the password hash, never serialized
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Repository trait for Book entity
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Books ordered most recently created first, sliced by `page`
    async fn find_page(&self, page: PageRequest) -> Result<PaginatedBooks, DomainError>;

    /// Find a single book by ID
    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, DomainError>;

    /// Every book added by `owner`, oldest first
    async fn find_by_owner(&self, owner: UserId) -> Result<Vec<Book>, DomainError>;

    /// Create a new book
    async fn create(&self, book: NewBook) -> Result<Book, DomainError>;

    /// Persist the editable fields of an existing book
    async fn update(&self, book: Book) -> Result<Book, DomainError>;

    /// Delete a book by ID
    async fn delete(&self, id: BookId) -> Result<(), DomainError>;
}

/// Repository trait for Review entity
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn find_by_id(&self, id: ReviewId) -> Result<Option<Review>, DomainError>;

    /// Reviews of a book, oldest first, with the reviewer's name
    async fn find_by_book(&self, book_id: BookId) -> Result<Vec<ReviewWithUser>, DomainError>;

    async fn find_by_book_and_user(
        &self,
        book_id: BookId,
        user_id: UserId,
    ) -> Result<Option<Review>, DomainError>;

    /// Insert a review. A second review for the same (book, user) pair
    /// is rejected by the store with `DomainError::Conflict`.
    async fn create(&self, review: NewReview) -> Result<Review, DomainError>;

    async fn update(&self, review: Review) -> Result<Review, DomainError>;

    async fn delete(&self, id: ReviewId) -> Result<(), DomainError>;

    /// Delete every review of a book, returning how many were removed
    async fn delete_by_book(&self, book_id: BookId) -> Result<u64, DomainError>;
}

/// Repository trait for User entity
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Lookup by normalized email, including the password hash
    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, DomainError>;

    /// Create a user. Duplicate emails are rejected with `DomainError::Conflict`.
    async fn create(
        &self,
        name: String,
        email: String,
        password_hash: String,
    ) -> Result<User, DomainError>;
}
