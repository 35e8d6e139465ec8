use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use super::error::ApiResult;
use crate::domain::{LoginInput, RegisterInput};
use crate::infrastructure::AppState;
use crate::infrastructure::auth::AuthUser;
use crate::services::user_service;

#[utoipa::path(
    post,
    path = "/api/users/register",
    responses(
        (status = 201, description = "Account created, token issued"),
        (status = 400, description = "Missing fields or email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterInput>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(input) = payload?;
    let auth = user_service::register(state.user_repo.as_ref(), input).await?;
    Ok((StatusCode::CREATED, Json(auth)))
}

#[utoipa::path(
    post,
    path = "/api/users/login",
    responses(
        (status = 200, description = "Token issued"),
        (status = 401, description = "Invalid email or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginInput>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(input) = payload?;
    let auth = user_service::login(state.user_repo.as_ref(), input).await?;
    Ok(Json(auth))
}

#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Profile of the authenticated user"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer" = []))
)]
pub async fn me(State(state): State<AppState>, user: AuthUser) -> ApiResult<impl IntoResponse> {
    let profile = user_service::get_profile(state.user_repo.as_ref(), user.id).await?;
    Ok(Json(profile))
}
