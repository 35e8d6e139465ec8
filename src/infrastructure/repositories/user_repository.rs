//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use super::conflict_on_unique;
use crate::domain::errors::DUPLICATE_EMAIL;
use crate::domain::{DomainError, UserCredentials, UserId, UserRepository};
use crate::models::User;
use crate::models::user::{ActiveModel, Column, Entity as UserEntity};

/// SeaORM-based implementation of UserRepository
pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let user = UserEntity::find_by_id(id.value()).one(&self.db).await?;
        Ok(user.map(User::from))
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, DomainError> {
        let user = UserEntity::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(user.map(|model| {
            let password_hash = model.password_hash.clone();
            UserCredentials {
                user: User::from(model),
                password_hash,
            }
        }))
    }

    async fn create(
        &self,
        name: String,
        email: String,
        password_hash: String,
    ) -> Result<User, DomainError> {
        let now = chrono::Utc::now().to_rfc3339();

        let user = ActiveModel {
            name: Set(name),
            email: Set(email),
            password_hash: Set(password_hash),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = user
            .insert(&self.db)
            .await
            .map_err(|e| conflict_on_unique(e, DUPLICATE_EMAIL))?;
        Ok(User::from(result))
    }
}
