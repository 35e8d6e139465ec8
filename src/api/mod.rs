pub mod books;
pub mod error;
pub mod health;
pub mod reviews;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};

use crate::infrastructure::AppState;

pub use error::{ApiError, ApiResult};

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Accounts
        .route("/users/register", post(users::register))
        .route("/users/login", post(users::login))
        .route("/users/me", get(users::me))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        // Reviews: POST takes a book id, PUT/DELETE a review id
        .route(
            "/reviews/:id",
            post(reviews::add_review)
                .put(reviews::update_review)
                .delete(reviews::delete_review),
        )
        .with_state(state)
}
