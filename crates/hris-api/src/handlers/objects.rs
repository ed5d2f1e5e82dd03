// ============================================================================
// HRIS API - Object Handlers
// File: crates/hris-api/src/handlers/objects.rs
// ============================================================================
//! Object hierarchy endpoints: CRUD plus tree, move, and copy.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use uuid::Uuid;

use hris_core::domain::AppObject;
use hris_core::hierarchy::ObjectNode;
use hris_core::services::{CreateObjectInput, MoveObjectInput, UpdateObjectInput};

use crate::error::ApiFailure;
use crate::handlers::actor_id;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/objects
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<AppObject>>>, ApiFailure> {
    let objects = state.objects.list().await?;
    Ok(Json(ApiResponse::success(objects)))
}

/// GET /api/v1/objects/tree
pub async fn tree(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ObjectNode>>>, ApiFailure> {
    let forest = state.objects.tree().await?;
    Ok(Json(ApiResponse::success(forest)))
}

/// GET /api/v1/objects/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AppObject>>, ApiFailure> {
    let object = state.objects.get(&id).await?;
    Ok(Json(ApiResponse::success(object)))
}

/// POST /api/v1/objects
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<CreateObjectInput>,
) -> Result<Json<ApiResponse<AppObject>>, ApiFailure> {
    let created = state.objects.create(input, actor_id(&headers)).await?;
    Ok(Json(ApiResponse::success(created)))
}

/// PUT /api/v1/objects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(input): Json<UpdateObjectInput>,
) -> Result<Json<ApiResponse<AppObject>>, ApiFailure> {
    let updated = state.objects.update(&id, input, actor_id(&headers)).await?;
    Ok(Json(ApiResponse::success(updated)))
}

/// DELETE /api/v1/objects/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<()>>, ApiFailure> {
    state.objects.delete(&id, actor_id(&headers)).await?;
    Ok(Json(ApiResponse::success(())))
}

/// POST /api/v1/objects/{id}/move
pub async fn move_object(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(input): Json<MoveObjectInput>,
) -> Result<Json<ApiResponse<AppObject>>, ApiFailure> {
    let moved = state
        .objects
        .move_object(&id, input, actor_id(&headers))
        .await?;
    Ok(Json(ApiResponse::success(moved)))
}

/// POST /api/v1/objects/{id}/copy
pub async fn copy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<AppObject>>, ApiFailure> {
    let copied = state.objects.copy(&id, actor_id(&headers)).await?;
    Ok(Json(ApiResponse::success(copied)))
}
