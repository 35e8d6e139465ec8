use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use super::error::ApiResult;
use crate::domain::{BookId, BookInput, BookPatch, PageRequest};
use crate::infrastructure::AppState;
use crate::infrastructure::auth::AuthUser;
use crate::services::book_service;

#[derive(Debug, Deserialize)]
pub struct ListBooksQuery {
    // Kept as text so non-numeric values fall back to page 1
    pub page: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/books",
    params(
        ("page" = Option<u64>, Query, description = "1-based page number, 5 books per page")
    ),
    responses(
        (status = 200, description = "One page of books, newest first")
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    params: Result<Query<ListBooksQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let page = match params {
        Ok(Query(params)) => PageRequest::from_query(params.page.as_deref()),
        Err(rejection) => {
            tracing::debug!("Unreadable book list query, using page 1: {}", rejection);
            PageRequest::default()
        }
    };
    let result = book_service::list_books(state.book_repo.as_ref(), page).await?;
    Ok(Json(result))
}

#[utoipa::path(
    get,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book with reviews and average rating"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    id: Result<Path<BookId>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(id) = id?;
    let detail =
        book_service::get_book_detail(state.book_repo.as_ref(), state.review_repo.as_ref(), id)
            .await?;
    Ok(Json(detail))
}

#[utoipa::path(
    post,
    path = "/api/books",
    responses(
        (status = 201, description = "Book created"),
        (status = 400, description = "Title or author missing"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer" = []))
)]
pub async fn create_book(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<BookInput>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(input) = payload?;
    let book = book_service::add_book(state.book_repo.as_ref(), user.id, input).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

#[utoipa::path(
    put,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book updated"),
        (status = 403, description = "Not the book's owner"),
        (status = 404, description = "Book not found")
    ),
    security(("bearer" = []))
)]
pub async fn update_book(
    State(state): State<AppState>,
    user: AuthUser,
    id: Result<Path<BookId>, PathRejection>,
    payload: Result<Json<BookPatch>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(id) = id?;
    let Json(patch) = payload?;
    let book = book_service::update_book(state.book_repo.as_ref(), user.id, id, patch).await?;
    Ok(Json(book))
}

#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book and its reviews removed"),
        (status = 403, description = "Not the book's owner"),
        (status = 404, description = "Book not found")
    ),
    security(("bearer" = []))
)]
pub async fn delete_book(
    State(state): State<AppState>,
    user: AuthUser,
    id: Result<Path<BookId>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(id) = id?;
    book_service::delete_book(
        state.book_repo.as_ref(),
        state.review_repo.as_ref(),
        user.id,
        id,
    )
    .await?;
    Ok(Json(json!({ "message": "Book removed" })))
}
