//! App user CRUD handlers

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use uuid::Uuid;

use hris_core::domain::AppUser;
use hris_core::services::{CreateUserInput, UpdateUserInput};

use crate::error::ApiFailure;
use crate::handlers::actor_id;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/users
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<AppUser>>>, ApiFailure> {
    let users = state.users.list().await?;
    Ok(Json(ApiResponse::success(users)))
}

/// GET /api/v1/users/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AppUser>>, ApiFailure> {
    let user = state.users.get(&id).await?;
    Ok(Json(ApiResponse::success(user)))
}

/// POST /api/v1/users
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<CreateUserInput>,
) -> Result<Json<ApiResponse<AppUser>>, ApiFailure> {
    let created = state.users.create(input, actor_id(&headers)).await?;
    Ok(Json(ApiResponse::success(created)))
}

/// PUT /api/v1/users/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(input): Json<UpdateUserInput>,
) -> Result<Json<ApiResponse<AppUser>>, ApiFailure> {
    let updated = state.users.update(&id, input, actor_id(&headers)).await?;
    Ok(Json(ApiResponse::success(updated)))
}

/// DELETE /api/v1/users/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<()>>, ApiFailure> {
    state.users.delete(&id, actor_id(&headers)).await?;
    Ok(Json(ApiResponse::success(())))
}
