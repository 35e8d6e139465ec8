use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use shelfnotes::api;
use shelfnotes::db;
use shelfnotes::infrastructure::AppState;
use tower::util::ServiceExt; // for `oneshot`

// Helper to create a router over a fresh in-memory database
async fn setup_test_app() -> Router {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    api::api_router(AppState::new(db))
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().uri(uri).method(method);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let req = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

// Helper to register a user, returning (id, token)
async fn register_user(app: &Router, name: &str, email: &str) -> (i64, String) {
    let (status, body) = send(
        app,
        "POST",
        "/users/register",
        None,
        Some(json!({ "name": name, "email": email, "password": "secret123" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
    (
        body["id"].as_i64().unwrap(),
        body["token"].as_str().unwrap().to_string(),
    )
}

async fn create_book(app: &Router, token: &str, title: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/books",
        Some(token),
        Some(json!({ "title": title, "author": "Test Author", "genre": "Fiction" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_test_app().await;
    let (status, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_create_book_sets_owner() {
    let app = setup_test_app().await;
    let (alice_id, alice) = register_user(&app, "Alice", "alice@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/books",
        Some(&alice),
        Some(json!({
            "title": "Dune",
            "author": "Frank Herbert",
            "description": "Spice",
            "publishedYear": 1965
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["title"], "Dune");
    assert_eq!(body["publishedYear"], 1965);
    assert_eq!(body["addedBy"], alice_id);
    assert!(body["genre"].is_null());
}

#[tokio::test]
async fn test_list_books_paginates_newest_first() {
    let app = setup_test_app().await;
    let (_, alice) = register_user(&app, "Alice", "alice@example.com").await;
    for i in 1..=7 {
        create_book(&app, &alice, &format!("Book {}", i)).await;
    }

    let (status, body) = send(&app, "GET", "/books", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let books = body["books"].as_array().unwrap();
    assert_eq!(books.len(), 5);
    assert_eq!(books[0]["title"], "Book 7");
    assert_eq!(books[0]["addedByName"], "Alice");
    assert_eq!(body["currentPage"], 1);
    assert_eq!(body["totalPages"], 2);

    let (_, body) = send(&app, "GET", "/books?page=2", None, None).await;
    let books = body["books"].as_array().unwrap();
    assert_eq!(books.len(), 2);
    assert_eq!(books[1]["title"], "Book 1");
    assert_eq!(body["currentPage"], 2);

    // Past the last page: empty, not an error
    let (status, body) = send(&app, "GET", "/books?page=9", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["books"].as_array().unwrap().is_empty());
    assert_eq!(body["currentPage"], 9);
    assert_eq!(body["totalPages"], 2);

    // Unparseable page falls back to the first
    let (_, body) = send(&app, "GET", "/books?page=abc", None, None).await;
    assert_eq!(body["currentPage"], 1);
    assert_eq!(body["books"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_empty_catalogue_has_zero_pages() {
    let app = setup_test_app().await;
    let (status, body) = send(&app, "GET", "/books", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["books"].as_array().unwrap().is_empty());
    assert_eq!(body["totalPages"], 0);
}

#[tokio::test]
async fn test_update_book_owner_only() {
    let app = setup_test_app().await;
    let (_, alice) = register_user(&app, "Alice", "alice@example.com").await;
    let (_, bob) = register_user(&app, "Bob", "bob@example.com").await;
    let book_id = create_book(&app, &alice, "Original").await;
    let uri = format!("/books/{}", book_id);

    let (status, body) = send(
        &app,
        "PUT",
        &uri,
        Some(&bob),
        Some(json!({ "title": "Hijacked" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "User not authorized");

    let (status, body) = send(
        &app,
        "PUT",
        &uri,
        Some(&alice),
        Some(json!({ "title": "Renamed", "genre": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Renamed");
    assert_eq!(body["author"], "Test Author");
    assert!(body["genre"].is_null());

    let (_, detail) = send(&app, "GET", &uri, None, None).await;
    assert_eq!(detail["book"]["title"], "Renamed");
}

#[tokio::test]
async fn test_update_book_with_same_values_is_a_no_op() {
    let app = setup_test_app().await;
    let (_, alice) = register_user(&app, "Alice", "alice@example.com").await;
    let book_id = create_book(&app, &alice, "Stable").await;
    let uri = format!("/books/{}", book_id);

    let (_, before) = send(&app, "GET", &uri, None, None).await;
    let (status, after) = send(
        &app,
        "PUT",
        &uri,
        Some(&alice),
        Some(json!({ "title": "Stable", "author": "Test Author" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(after["updatedAt"], before["book"]["updatedAt"]);
}

#[tokio::test]
async fn test_review_lifecycle() {
    let app = setup_test_app().await;
    let (_, alice) = register_user(&app, "Alice", "alice@example.com").await;
    let (carol_id, carol) = register_user(&app, "Carol", "carol@example.com").await;
    let book_id = create_book(&app, &alice, "B1").await;
    let review_uri = format!("/reviews/{}", book_id);

    // First review succeeds
    let (status, review) = send(
        &app,
        "POST",
        &review_uri,
        Some(&carol),
        Some(json!({ "rating": 5, "reviewText": "Great" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(review["rating"], 5);
    assert_eq!(review["userId"], carol_id);
    assert_eq!(review["bookId"], book_id);

    // Second review by the same user is rejected
    let (status, body) = send(
        &app,
        "POST",
        &review_uri,
        Some(&carol),
        Some(json!({ "rating": 3, "reviewText": "Changed my mind" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "You have already reviewed this book");

    // The owner cannot review their own book
    let (status, body) = send(
        &app,
        "POST",
        &review_uri,
        Some(&alice),
        Some(json!({ "rating": 1, "reviewText": "Mine" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "You cannot review your own book");

    let (status, detail) = send(&app, "GET", &format!("/books/{}", book_id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["averageRating"], 5.0);
    let reviews = detail["reviews"].as_array().unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["userName"], "Carol");
    assert_eq!(reviews[0]["reviewText"], "Great");
}

// Helper: one fresh reader per rating reviews a new book; returns the detail body
async fn average_for_ratings(ratings: &[i64]) -> Value {
    let app = setup_test_app().await;
    let (_, alice) = register_user(&app, "Alice", "alice@example.com").await;
    let book_id = create_book(&app, &alice, "Popular").await;

    for (i, rating) in ratings.iter().enumerate() {
        let (_, token) =
            register_user(&app, "Reader", &format!("reader{}@example.com", i)).await;
        let (status, _) = send(
            &app,
            "POST",
            &format!("/reviews/{}", book_id),
            Some(&token),
            Some(json!({ "rating": rating, "reviewText": "ok" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, detail) = send(&app, "GET", &format!("/books/{}", book_id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["reviews"].as_array().unwrap().len(), ratings.len());
    detail
}

#[tokio::test]
async fn test_average_rating_of_mixed_reviews() {
    let detail = average_for_ratings(&[4, 5, 3]).await;
    assert_eq!(detail["averageRating"], 4.0);
}

#[tokio::test]
async fn test_average_rating_rounds_to_one_decimal() {
    let detail = average_for_ratings(&[5, 5, 4]).await;
    assert_eq!(detail["averageRating"], 4.7);
}

#[tokio::test]
async fn test_book_without_reviews_has_zero_average() {
    let app = setup_test_app().await;
    let (_, alice) = register_user(&app, "Alice", "alice@example.com").await;
    let book_id = create_book(&app, &alice, "Unread").await;

    let (_, detail) = send(&app, "GET", &format!("/books/{}", book_id), None, None).await;
    assert_eq!(detail["averageRating"], 0.0);
    assert!(detail["reviews"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_update_and_delete_review_author_only() {
    let app = setup_test_app().await;
    let (_, alice) = register_user(&app, "Alice", "alice@example.com").await;
    let (_, bob) = register_user(&app, "Bob", "bob@example.com").await;
    let (_, carol) = register_user(&app, "Carol", "carol@example.com").await;
    let book_id = create_book(&app, &alice, "Shared").await;

    let (_, review) = send(
        &app,
        "POST",
        &format!("/reviews/{}", book_id),
        Some(&bob),
        Some(json!({ "rating": 2, "reviewText": "Meh" })),
    )
    .await;
    let review_uri = format!("/reviews/{}", review["id"].as_i64().unwrap());

    let (status, _) = send(
        &app,
        "PUT",
        &review_uri,
        Some(&carol),
        Some(json!({ "rating": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, updated) = send(
        &app,
        "PUT",
        &review_uri,
        Some(&bob),
        Some(json!({ "rating": 4 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["rating"], 4);
    assert_eq!(updated["reviewText"], "Meh");

    let (status, _) = send(&app, "DELETE", &review_uri, Some(&carol), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, "DELETE", &review_uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Review removed");

    let (status, _) = send(&app, "DELETE", &review_uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_book_removes_its_reviews() {
    let app = setup_test_app().await;
    let (_, alice) = register_user(&app, "Alice", "alice@example.com").await;
    let (_, bob) = register_user(&app, "Bob", "bob@example.com").await;
    let book_id = create_book(&app, &alice, "Doomed").await;
    let book_uri = format!("/books/{}", book_id);

    let (_, review) = send(
        &app,
        "POST",
        &format!("/reviews/{}", book_id),
        Some(&bob),
        Some(json!({ "rating": 3, "reviewText": "Fine" })),
    )
    .await;

    let (status, _) = send(&app, "DELETE", &book_uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // A refused delete leaves the book and its reviews in place
    let (status, detail) = send(&app, "GET", &book_uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["book"]["title"], "Doomed");
    let reviews = detail["reviews"].as_array().unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["id"], review["id"]);

    let (status, body) = send(&app, "DELETE", &book_uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Book removed");

    let (status, _) = send(&app, "GET", &book_uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The review went with the book
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/reviews/{}", review["id"].as_i64().unwrap()),
        Some(&bob),
        Some(json!({ "rating": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_owner_review_forbidden_whatever_the_rating() {
    let app = setup_test_app().await;
    let (_, alice) = register_user(&app, "Alice", "alice@example.com").await;
    let book_id = create_book(&app, &alice, "Mine").await;
    let review_uri = format!("/reviews/{}", book_id);

    for rating in [json!(9), json!(0), json!(4.5), json!("5"), json!(null), json!(3)] {
        let (status, body) = send(
            &app,
            "POST",
            &review_uri,
            Some(&alice),
            Some(json!({ "rating": rating, "reviewText": "Self praise" })),
        )
        .await;
        assert_eq!(
            status,
            StatusCode::FORBIDDEN,
            "owner review with rating {} should be forbidden",
            rating
        );
        assert_eq!(body["error"], "You cannot review your own book");
    }

    // Nothing was stored by any of the refused attempts
    let (_, detail) = send(&app, "GET", &format!("/books/{}", book_id), None, None).await;
    assert!(detail["reviews"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_non_integer_rating_is_a_validation_error() {
    let app = setup_test_app().await;
    let (_, alice) = register_user(&app, "Alice", "alice@example.com").await;
    let (_, bob) = register_user(&app, "Bob", "bob@example.com").await;
    let book_id = create_book(&app, &alice, "Rated").await;

    for rating in [json!(4.5), json!("5")] {
        let (status, body) = send(
            &app,
            "POST",
            &format!("/reviews/{}", book_id),
            Some(&bob),
            Some(json!({ "rating": rating, "reviewText": "Hmm" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Rating must be a whole number between 1 and 5");
    }
}

#[tokio::test]
async fn test_huge_page_number_returns_empty_page() {
    let app = setup_test_app().await;
    let (_, alice) = register_user(&app, "Alice", "alice@example.com").await;
    create_book(&app, &alice, "Only").await;

    let (status, body) = send(&app, "GET", "/books?page=2000000000000000000", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["books"].as_array().unwrap().is_empty());
    assert_eq!(body["currentPage"], 2_000_000_000_000_000_000u64);
    assert_eq!(body["totalPages"], 1);
}

#[tokio::test]
async fn test_unreadable_page_query_falls_back_to_first_page() {
    let app = setup_test_app().await;
    let (_, alice) = register_user(&app, "Alice", "alice@example.com").await;
    create_book(&app, &alice, "Only").await;

    let (status, body) = send(&app, "GET", "/books?page=1&page=2", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currentPage"], 1);
    assert_eq!(body["books"].as_array().unwrap().len(), 1);
}
