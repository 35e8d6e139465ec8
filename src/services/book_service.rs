//! Book Service - Pure business logic without HTTP layer
//!
//! Catalogue paging, book detail aggregation and owner-only mutation.
//! Every operation works against repository traits so it can be driven by
//! the Axum handlers, the seed routine or tests alike.

use serde::{Deserialize, Serialize};

use crate::domain::ownership::ensure_owner;
use crate::domain::{
    BookId, BookInput, BookPatch, BookRepository, DomainError, PageRequest, ReviewRepository,
    UserId, average_rating, total_pages,
};
use crate::models::{Book, ReviewWithUser};

/// One catalogue page as returned by `GET /books`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPage {
    pub books: Vec<Book>,
    pub current_page: u64,
    pub total_pages: u64,
}

/// A book with its reviews and their average rating
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDetail {
    pub book: Book,
    pub reviews: Vec<ReviewWithUser>,
    pub average_rating: f64,
}

/// List books, most recently created first. A page past the end is empty.
pub async fn list_books(
    books: &dyn BookRepository,
    page: PageRequest,
) -> Result<BookPage, DomainError> {
    let result = books.find_page(page).await?;

    tracing::debug!(
        "List books - page={} returned {} of {} books",
        page.page,
        result.books.len(),
        result.total
    );

    Ok(BookPage {
        books: result.books,
        current_page: page.page,
        total_pages: total_pages(result.total, page.page_size),
    })
}

/// Get a single book with its reviews and average rating
pub async fn get_book_detail(
    books: &dyn BookRepository,
    reviews: &dyn ReviewRepository,
    id: BookId,
) -> Result<BookDetail, DomainError> {
    let book = books
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Book"))?;

    let reviews = reviews.find_by_book(id).await?;
    let average_rating = average_rating(reviews.iter().map(|r| r.review.rating));

    Ok(BookDetail {
        book,
        reviews,
        average_rating,
    })
}

/// Create a new book owned by `owner`
pub async fn add_book(
    books: &dyn BookRepository,
    owner: UserId,
    input: BookInput,
) -> Result<Book, DomainError> {
    let new_book = input.validate(owner)?;
    let book = books.create(new_book).await?;
    tracing::info!("Book {} added by user {}", book.id, owner);
    Ok(book)
}

/// Update the supplied fields of a book. Only its owner may do this.
pub async fn update_book(
    books: &dyn BookRepository,
    requester: UserId,
    id: BookId,
    patch: BookPatch,
) -> Result<Book, DomainError> {
    let mut book = books
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Book"))?;

    if let Err(e) = ensure_owner(book.added_by, requester) {
        tracing::warn!("User {} tried to update book {} they do not own", requester, id);
        return Err(e);
    }

    if !patch.apply_to(&mut book)? {
        tracing::debug!("Update of book {} changed nothing", id);
        return Ok(book);
    }

    books.update(book).await
}

/// Delete a book and, before it, every review of it. Only its owner may do this.
pub async fn delete_book(
    books: &dyn BookRepository,
    reviews: &dyn ReviewRepository,
    requester: UserId,
    id: BookId,
) -> Result<(), DomainError> {
    let book = books
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Book"))?;

    if let Err(e) = ensure_owner(book.added_by, requester) {
        tracing::warn!("User {} tried to delete book {} they do not own", requester, id);
        return Err(e);
    }

    let removed = reviews.delete_by_book(id).await?;
    books.delete(id).await?;

    tracing::info!("Book {} deleted along with {} reviews", id, removed);
    Ok(())
}
