use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::{BookId, UserId};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub published_year: Option<i32>,
    /// Owning user; only they may edit or delete the book
    pub added_by: i32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AddedBy",
        to = "super::user::Column::Id"
    )]
    Owner,
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// DTO for API responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub published_year: Option<i32>,
    pub added_by: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_by_name: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Model> for Book {
    fn from(model: Model) -> Self {
        Self {
            id: BookId::from(model.id),
            title: model.title,
            author: model.author,
            description: model.description,
            genre: model.genre,
            published_year: model.published_year,
            added_by: UserId::from(model.added_by),
            added_by_name: None,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl Book {
    /// Attach the owner's display name when the owner row was joined
    pub fn with_owner(mut self, owner: Option<super::user::Model>) -> Self {
        self.added_by_name = owner.map(|u| u.name);
        self
    }
}
