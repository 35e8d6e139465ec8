use shelfnotes::db;
use shelfnotes::domain::{BookRepository, PageRequest, RegisterInput, ReviewRepository};
use shelfnotes::infrastructure::AppState;
use shelfnotes::seed;
use shelfnotes::services::user_service;

// Helper to create a test app state
async fn setup_test_state() -> AppState {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    AppState::new(db)
}

// Every demo book with the number of reviews it carries
async fn catalogue(state: &AppState) -> Vec<(String, usize)> {
    let page = state
        .book_repo
        .find_page(PageRequest::new(1, 100))
        .await
        .expect("Failed to list books");

    let mut books = Vec::new();
    for book in page.books {
        let reviews = state
            .review_repo
            .find_by_book(book.id)
            .await
            .expect("Failed to list reviews");
        books.push((book.title, reviews.len()));
    }
    books.sort();
    books
}

#[tokio::test]
async fn test_seed_runs_twice_without_duplicates() {
    let state = setup_test_state().await;

    seed::seed_demo_data(&state).await.expect("First seed failed");
    let first = catalogue(&state).await;
    assert_eq!(first.len(), 6);
    assert!(first.iter().all(|(_, reviews)| *reviews == 1));

    seed::seed_demo_data(&state).await.expect("Second seed failed");
    assert_eq!(catalogue(&state).await, first);
}

#[tokio::test]
async fn test_seed_completes_after_partial_run() {
    let state = setup_test_state().await;

    // Only the first demo account made it before an earlier run stopped
    user_service::register(
        state.user_repo.as_ref(),
        RegisterInput {
            name: Some("Alice".into()),
            email: Some("alice@example.com".into()),
            password: Some("password".into()),
        },
    )
    .await
    .expect("Failed to register");

    seed::seed_demo_data(&state).await.expect("Seed failed");

    let books = catalogue(&state).await;
    assert_eq!(books.len(), 6);
    assert!(books.iter().all(|(_, reviews)| *reviews == 1));
}
