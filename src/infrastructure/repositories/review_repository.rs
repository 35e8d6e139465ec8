//! SeaORM implementation of ReviewRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::conflict_on_unique;
use crate::domain::errors::DUPLICATE_REVIEW;
use crate::domain::{BookId, DomainError, NewReview, ReviewId, ReviewRepository, UserId};
use crate::models::review::{ActiveModel, Column, Entity as ReviewEntity};
use crate::models::user::Entity as UserEntity;
use crate::models::{Review, ReviewWithUser};

/// SeaORM-based implementation of ReviewRepository
pub struct SeaOrmReviewRepository {
    db: DatabaseConnection,
}

impl SeaOrmReviewRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewRepository for SeaOrmReviewRepository {
    async fn find_by_id(&self, id: ReviewId) -> Result<Option<Review>, DomainError> {
        ReviewEntity::find_by_id(id.value())
            .one(&self.db)
            .await?
            .map(Review::try_from)
            .transpose()
    }

    async fn find_by_book(&self, book_id: BookId) -> Result<Vec<ReviewWithUser>, DomainError> {
        let rows = ReviewEntity::find()
            .filter(Column::BookId.eq(book_id.value()))
            .find_also_related(UserEntity)
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;

        rows.into_iter()
            .map(|(review, user)| -> Result<ReviewWithUser, DomainError> {
                Ok(ReviewWithUser {
                    review: Review::try_from(review)?,
                    user_name: user.map(|u| u.name).unwrap_or_default(),
                })
            })
            .collect()
    }

    async fn find_by_book_and_user(
        &self,
        book_id: BookId,
        user_id: UserId,
    ) -> Result<Option<Review>, DomainError> {
        ReviewEntity::find()
            .filter(Column::BookId.eq(book_id.value()))
            .filter(Column::UserId.eq(user_id.value()))
            .one(&self.db)
            .await?
            .map(Review::try_from)
            .transpose()
    }

    async fn create(&self, review: NewReview) -> Result<Review, DomainError> {
        let now = chrono::Utc::now().to_rfc3339();

        let new_review = ActiveModel {
            book_id: Set(review.book_id.value()),
            user_id: Set(review.user_id.value()),
            rating: Set(i32::from(review.rating.value())),
            review_text: Set(review.review_text),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = new_review
            .insert(&self.db)
            .await
            .map_err(|e| conflict_on_unique(e, DUPLICATE_REVIEW))?;
        Review::try_from(result)
    }

    async fn update(&self, review: Review) -> Result<Review, DomainError> {
        let existing = ReviewEntity::find_by_id(review.id.value())
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::not_found("Review"))?;

        let mut active: ActiveModel = existing.into();
        active.rating = Set(i32::from(review.rating.value()));
        active.review_text = Set(review.review_text);
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let result = active.update(&self.db).await?;
        Review::try_from(result)
    }

    async fn delete(&self, id: ReviewId) -> Result<(), DomainError> {
        let result = ReviewEntity::delete_by_id(id.value())
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Review"));
        }

        Ok(())
    }

    async fn delete_by_book(&self, book_id: BookId) -> Result<u64, DomainError> {
        let result = ReviewEntity::delete_many()
            .filter(Column::BookId.eq(book_id.value()))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
