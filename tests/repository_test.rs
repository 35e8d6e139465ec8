use sea_orm::{ConnectionTrait, DatabaseConnection, Statement, Value};
use shelfnotes::db;
use shelfnotes::domain::{
    BookInput, BookRepository, DomainError, NewReview, PageRequest, Rating, ReviewRepository,
    UserId, UserRepository,
};
use shelfnotes::infrastructure::{
    SeaOrmBookRepository, SeaOrmReviewRepository, SeaOrmUserRepository,
};
use shelfnotes::services::book_service;

async fn setup_test_db() -> DatabaseConnection {
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

async fn create_user(users: &SeaOrmUserRepository, email: &str) -> UserId {
    users
        .create("Tester".to_string(), email.to_string(), "hash".to_string())
        .await
        .expect("Failed to create user")
        .id
}

#[tokio::test]
async fn test_unique_index_rejects_second_review() {
    let db = setup_test_db().await;
    let users = SeaOrmUserRepository::new(db.clone());
    let books = SeaOrmBookRepository::new(db.clone());
    let reviews = SeaOrmReviewRepository::new(db.clone());

    let owner = create_user(&users, "owner@example.com").await;
    let reader = create_user(&users, "reader@example.com").await;
    let book = book_service::add_book(
        &books,
        owner,
        BookInput {
            title: Some("Dune".into()),
            author: Some("Frank Herbert".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let review = |rating: i64| NewReview {
        book_id: book.id,
        user_id: reader,
        rating: Rating::try_from(rating).unwrap(),
        review_text: "text".to_string(),
    };

    reviews.create(review(4)).await.unwrap();

    // Bypasses the service check, so only the store stands in the way
    let err = reviews.create(review(2)).await.unwrap_err();
    assert_eq!(
        err,
        DomainError::Conflict("You have already reviewed this book".to_string())
    );
    assert_eq!(reviews.find_by_book(book.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let db = setup_test_db().await;
    let users = SeaOrmUserRepository::new(db);

    create_user(&users, "dup@example.com").await;
    let err = users
        .create("Other".into(), "dup@example.com".into(), "hash".into())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));
}

#[tokio::test]
async fn test_review_for_missing_book_violates_foreign_key() {
    let db = setup_test_db().await;
    let users = SeaOrmUserRepository::new(db.clone());
    let reviews = SeaOrmReviewRepository::new(db.clone());
    let reader = create_user(&users, "reader@example.com").await;

    let result = reviews
        .create(NewReview {
            book_id: 777.into(),
            user_id: reader,
            rating: Rating::try_from(3i64).unwrap(),
            review_text: String::new(),
        })
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_rating_check_constraint() {
    let db = setup_test_db().await;
    let users = SeaOrmUserRepository::new(db.clone());
    let books = SeaOrmBookRepository::new(db.clone());
    let owner = create_user(&users, "owner@example.com").await;
    let reader = create_user(&users, "reader@example.com").await;
    let book = book_service::add_book(
        &books,
        owner,
        BookInput {
            title: Some("T".into()),
            author: Some("A".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let result = db
        .execute(Statement::from_sql_and_values(
            db.get_database_backend(),
            "INSERT INTO reviews (book_id, user_id, rating, review_text, created_at, updated_at) \
             VALUES (?, ?, 9, '', '', '')",
            [Value::from(book.id.value()), Value::from(reader.value())],
        ))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_find_page_counts_all_books() {
    let db = setup_test_db().await;
    let users = SeaOrmUserRepository::new(db.clone());
    let books = SeaOrmBookRepository::new(db);
    let owner = create_user(&users, "owner@example.com").await;

    for i in 0..6 {
        book_service::add_book(
            &books,
            owner,
            BookInput {
                title: Some(format!("Book {}", i)),
                author: Some("A".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    }

    let page = books.find_page(PageRequest::new(2, 5)).await.unwrap();
    assert_eq!(page.total, 6);
    assert_eq!(page.books.len(), 1);
    assert_eq!(page.books[0].title, "Book 0");
    assert_eq!(page.books[0].added_by_name.as_deref(), Some("Tester"));
}
