//! Review Service - one review per user per book, owner-only edits

use crate::domain::errors::DUPLICATE_REVIEW;
use crate::domain::ownership::{ensure_not_owner, ensure_owner};
use crate::domain::{
    BookId, BookRepository, DomainError, ReviewId, ReviewInput, ReviewPatch, ReviewRepository,
    UserId,
};
use crate::models::Review;

/// Add a review of `book_id` by `requester`.
///
/// Checks run in order: the book exists, the requester has not reviewed it
/// yet, the requester does not own it, the rating is valid. The existence
/// check is only an early exit; the store's unique index on
/// (book_id, user_id) rejects a concurrent duplicate with the same Conflict.
pub async fn add_review(
    books: &dyn BookRepository,
    reviews: &dyn ReviewRepository,
    requester: UserId,
    book_id: BookId,
    input: ReviewInput,
) -> Result<Review, DomainError> {
    let book = books
        .find_by_id(book_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Book"))?;

    if reviews
        .find_by_book_and_user(book_id, requester)
        .await?
        .is_some()
    {
        return Err(DomainError::Conflict(DUPLICATE_REVIEW.to_string()));
    }

    ensure_not_owner(book.added_by, requester)?;

    let review = reviews.create(input.validate(book_id, requester)?).await?;
    tracing::info!(
        "Review {} ({} stars) added to book {} by user {}",
        review.id,
        review.rating,
        book_id,
        requester
    );
    Ok(review)
}

/// Update the supplied fields of a review. Only its author may do this.
pub async fn update_review(
    reviews: &dyn ReviewRepository,
    requester: UserId,
    id: ReviewId,
    patch: ReviewPatch,
) -> Result<Review, DomainError> {
    let mut review = reviews
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Review"))?;

    if let Err(e) = ensure_owner(review.user_id, requester) {
        tracing::warn!("User {} tried to update review {} they did not write", requester, id);
        return Err(e);
    }

    if !patch.apply_to(&mut review)? {
        return Ok(review);
    }

    reviews.update(review).await
}

/// Delete a review. Only its author may do this.
pub async fn delete_review(
    reviews: &dyn ReviewRepository,
    requester: UserId,
    id: ReviewId,
) -> Result<(), DomainError> {
    let review = reviews
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Review"))?;

    if let Err(e) = ensure_owner(review.user_id, requester) {
        tracing::warn!("User {} tried to delete review {} they did not write", requester, id);
        return Err(e);
    }

    reviews.delete(id).await?;
    tracing::info!("Review {} deleted", id);
    Ok(())
}
