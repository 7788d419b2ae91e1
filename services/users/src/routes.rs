//! User service routes

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    extract::{JsonBody, PathParam},
    models::{PasswordResetRequest, RegisterUser, UpdateUser},
    state::AppState,
};

/// Create the router for the user service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/users/register", post(register_user))
        .route("/users/email/:email", get(get_user_by_email))
        .route("/users/username/:username", get(get_user_by_username))
        .route("/users/all", get(get_all_users))
        .route("/users/update/:id", put(update_user))
        .route("/users/delete/:id", delete(delete_user))
        .route("/users/request-password-reset", post(request_password_reset))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "users-service"
    }))
}

/// Register a new user
pub async fn register_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterUser>,
) -> ApiResult<impl IntoResponse> {
    info!(username = %payload.username, "registration request");

    let user = state.user_service.register(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Get a user by email
pub async fn get_user_by_email(
    State(state): State<AppState>,
    PathParam(email): PathParam<String>,
) -> ApiResult<impl IntoResponse> {
    let user = state
        .user_service
        .find_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;
    Ok(Json(user))
}

/// Get a user by username
pub async fn get_user_by_username(
    State(state): State<AppState>,
    PathParam(username): PathParam<String>,
) -> ApiResult<impl IntoResponse> {
    let user = state
        .user_service
        .find_by_username(&username)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;
    Ok(Json(user))
}

/// Get all users
pub async fn get_all_users(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let users = state.user_service.list_all().await?;
    Ok(Json(users))
}

/// Apply a partial update to a user
pub async fn update_user(
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
    JsonBody(patch): JsonBody<UpdateUser>,
) -> ApiResult<impl IntoResponse> {
    let user = state.user_service.update(id, patch).await?;
    Ok(Json(user))
}

/// Delete a user
pub async fn delete_user(
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> ApiResult<impl IntoResponse> {
    state.user_service.delete(id).await?;
    Ok(Json(json!({"message": "User deleted successfully"})))
}

/// Request a password reset email
pub async fn request_password_reset(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<PasswordResetRequest>,
) -> ApiResult<impl IntoResponse> {
    state
        .user_service
        .request_password_reset(&payload.email)
        .await?;
    Ok(Json(json!({"message": "Password reset email sent"})))
}
