use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection, rejection::PathRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use super::error::ApiResult;
use crate::domain::{BookId, ReviewId, ReviewInput, ReviewPatch};
use crate::infrastructure::AppState;
use crate::infrastructure::auth::AuthUser;
use crate::services::review_service;

#[utoipa::path(
    post,
    path = "/api/reviews/{book_id}",
    params(("book_id" = i32, Path, description = "Id of the book being reviewed")),
    responses(
        (status = 201, description = "Review created"),
        (status = 400, description = "Invalid rating or already reviewed"),
        (status = 403, description = "Owners cannot review their own book"),
        (status = 404, description = "Book not found")
    ),
    security(("bearer" = []))
)]
pub async fn add_review(
    State(state): State<AppState>,
    user: AuthUser,
    book_id: Result<Path<BookId>, PathRejection>,
    payload: Result<Json<ReviewInput>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(book_id) = book_id?;
    let Json(input) = payload?;
    let review = review_service::add_review(
        state.book_repo.as_ref(),
        state.review_repo.as_ref(),
        user.id,
        book_id,
        input,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(review)))
}

#[utoipa::path(
    put,
    path = "/api/reviews/{review_id}",
    params(("review_id" = i32, Path, description = "Review id")),
    responses(
        (status = 200, description = "Review updated"),
        (status = 403, description = "Not the review's author"),
        (status = 404, description = "Review not found")
    ),
    security(("bearer" = []))
)]
pub async fn update_review(
    State(state): State<AppState>,
    user: AuthUser,
    review_id: Result<Path<ReviewId>, PathRejection>,
    payload: Result<Json<ReviewPatch>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(review_id) = review_id?;
    let Json(patch) = payload?;
    let review =
        review_service::update_review(state.review_repo.as_ref(), user.id, review_id, patch)
            .await?;
    Ok(Json(review))
}

#[utoipa::path(
    delete,
    path = "/api/reviews/{review_id}",
    params(("review_id" = i32, Path, description = "Review id")),
    responses(
        (status = 200, description = "Review removed"),
        (status = 403, description = "Not the review's author"),
        (status = 404, description = "Review not found")
    ),
    security(("bearer" = []))
)]
pub async fn delete_review(
    State(state): State<AppState>,
    user: AuthUser,
    review_id: Result<Path<ReviewId>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(review_id) = review_id?;
    review_service::delete_review(state.review_repo.as_ref(), user.id, review_id).await?;
    Ok(Json(json!({ "message": "Review removed" })))
}
