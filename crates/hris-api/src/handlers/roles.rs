// ============================================================================
// HRIS API - Role Handlers
// File: crates/hris-api/src/handlers/roles.rs
// ============================================================================
//! Role CRUD plus access grants and the resolved navigation snapshot.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hris_core::access::AccessSnapshot;
use hris_core::domain::Role;
use hris_core::services::RoleInput;

use crate::error::ApiFailure;
use crate::handlers::actor_id;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReplaceAccessRequest {
    pub object_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct AccessSavedResponse {
    pub role_id: Uuid,
    pub granted: usize,
}

/// GET /api/v1/roles
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Role>>>, ApiFailure> {
    let roles = state.roles.list().await?;
    Ok(Json(ApiResponse::success(roles)))
}

/// GET /api/v1/roles/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Role>>, ApiFailure> {
    let role = state.roles.get(&id).await?;
    Ok(Json(ApiResponse::success(role)))
}

/// POST /api/v1/roles
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<RoleInput>,
) -> Result<Json<ApiResponse<Role>>, ApiFailure> {
    let created = state.roles.create(input, actor_id(&headers)).await?;
    Ok(Json(ApiResponse::success(created)))
}

/// PUT /api/v1/roles/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(input): Json<RoleInput>,
) -> Result<Json<ApiResponse<Role>>, ApiFailure> {
    let updated = state.roles.update(&id, input, actor_id(&headers)).await?;
    Ok(Json(ApiResponse::success(updated)))
}

/// DELETE /api/v1/roles/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<()>>, ApiFailure> {
    state.roles.delete(&id, actor_id(&headers)).await?;
    Ok(Json(ApiResponse::success(())))
}

/// GET /api/v1/roles/{id}/access
///
/// The stored grant set, without ancestor expansion.
pub async fn access_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Uuid>>>, ApiFailure> {
    let granted = state.access.granted_object_ids(&id).await?;
    Ok(Json(ApiResponse::success(granted)))
}

/// PUT /api/v1/roles/{id}/access
///
/// Full replacement of the role's grants. There is no optimistic locking;
/// of two concurrent saves the later one wins.
pub async fn access_put(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(input): Json<ReplaceAccessRequest>,
) -> Result<Json<ApiResponse<AccessSavedResponse>>, ApiFailure> {
    let granted = state
        .access
        .replace_for_role(&id, &input.object_ids, actor_id(&headers))
        .await?;
    Ok(Json(ApiResponse::success(AccessSavedResponse {
        role_id: id,
        granted,
    })))
}

/// GET /api/v1/roles/{id}/navigation
///
/// The resolved snapshot the admin console builds its permission cache
/// from: menu tree, route table, access maps, and the build timestamp.
pub async fn navigation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AccessSnapshot>>, ApiFailure> {
    let snapshot = state.access.snapshot(&id).await?;
    Ok(Json(ApiResponse::success((*snapshot).clone())))
}
