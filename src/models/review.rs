use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::{BookId, DomainError, Rating, ReviewId, UserId};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub book_id: i32,
    pub user_id: i32,
    pub rating: i32, // 1-5, CHECK constraint in the schema
    pub review_text: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::book::Entity",
        from = "Column::BookId",
        to = "super::book::Column::Id"
    )]
    Book,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub book_id: BookId,
    pub user_id: UserId,
    pub rating: Rating,
    pub review_text: String,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<Model> for Review {
    type Error = DomainError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let rating = Rating::try_from(i64::from(model.rating)).map_err(|_| {
            DomainError::Internal(format!(
                "review {} has out-of-range rating {}",
                model.id, model.rating
            ))
        })?;

        Ok(Self {
            id: ReviewId::from(model.id),
            book_id: BookId::from(model.book_id),
            user_id: UserId::from(model.user_id),
            rating,
            review_text: model.review_text,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// A review as shown on the book detail page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewWithUser {
    #[serde(flatten)]
    pub review: Review,
    pub user_name: String,
}
