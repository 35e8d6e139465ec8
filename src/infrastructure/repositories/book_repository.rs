//! SeaORM implementation of BookRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::domain::{
    BookId, BookRepository, DomainError, NewBook, PageRequest, PaginatedBooks, UserId,
};
use crate::models::Book;
use crate::models::book::{ActiveModel, Column, Entity as BookEntity};
use crate::models::user::Entity as UserEntity;

/// SeaORM-based implementation of BookRepository
pub struct SeaOrmBookRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookRepository for SeaOrmBookRepository {
    async fn find_page(&self, page: PageRequest) -> Result<PaginatedBooks, DomainError> {
        let total = BookEntity::find().count(&self.db).await?;
        if page.is_past_end(total) {
            return Ok(PaginatedBooks {
                books: Vec::new(),
                total,
            });
        }

        let rows = BookEntity::find()
            .find_also_related(UserEntity)
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        let books = rows
            .into_iter()
            .map(|(book, owner)| Book::from(book).with_owner(owner))
            .collect();

        Ok(PaginatedBooks { books, total })
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, DomainError> {
        let row = BookEntity::find_by_id(id.value())
            .find_also_related(UserEntity)
            .one(&self.db)
            .await?;

        Ok(row.map(|(book, owner)| Book::from(book).with_owner(owner)))
    }

    async fn find_by_owner(&self, owner: UserId) -> Result<Vec<Book>, DomainError> {
        let rows = BookEntity::find()
            .filter(Column::AddedBy.eq(owner.value()))
            .find_also_related(UserEntity)
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(book, user)| Book::from(book).with_owner(user))
            .collect())
    }

    async fn create(&self, book: NewBook) -> Result<Book, DomainError> {
        let now = chrono::Utc::now().to_rfc3339();

        let new_book = ActiveModel {
            title: Set(book.title),
            author: Set(book.author),
            description: Set(book.description),
            genre: Set(book.genre),
            published_year: Set(book.published_year),
            added_by: Set(book.added_by.value()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = new_book.insert(&self.db).await?;
        Ok(Book::from(result))
    }

    async fn update(&self, book: Book) -> Result<Book, DomainError> {
        let existing = BookEntity::find_by_id(book.id.value())
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::not_found("Book"))?;

        let owner_name = book.added_by_name;

        let mut active: ActiveModel = existing.into();
        active.title = Set(book.title);
        active.author = Set(book.author);
        active.description = Set(book.description);
        active.genre = Set(book.genre);
        active.published_year = Set(book.published_year);
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let result = active.update(&self.db).await?;
        let mut updated = Book::from(result);
        updated.added_by_name = owner_name;
        Ok(updated)
    }

    async fn delete(&self, id: BookId) -> Result<(), DomainError> {
        let result = BookEntity::delete_by_id(id.value()).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Book"));
        }

        Ok(())
    }
}
