//! Reference configuration handlers
//!
//! Key/value rows grouped by `group_key`. The list endpoint takes the group
//! key as its path segment; item mutations address rows by id on the same
//! path, so the PUT/DELETE handlers parse the segment as a UUID.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use uuid::Uuid;

use hris_core::domain::ReferenceItem;
use hris_core::services::ReferenceInput;

use crate::error::ApiFailure;
use crate::handlers::actor_id;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/references/{group}
pub async fn list_group(
    State(state): State<AppState>,
    Path(group): Path<String>,
) -> Result<Json<ApiResponse<Vec<ReferenceItem>>>, ApiFailure> {
    let items = state.master.list_references(&group).await?;
    Ok(Json(ApiResponse::success(items)))
}

/// POST /api/v1/references
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<ReferenceInput>,
) -> Result<Json<ApiResponse<ReferenceItem>>, ApiFailure> {
    let created = state
        .master
        .create_reference(input, actor_id(&headers))
        .await?;
    Ok(Json(ApiResponse::success(created)))
}

/// PUT /api/v1/references/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(input): Json<ReferenceInput>,
) -> Result<Json<ApiResponse<ReferenceItem>>, ApiFailure> {
    let updated = state
        .master
        .update_reference(&id, input, actor_id(&headers))
        .await?;
    Ok(Json(ApiResponse::success(updated)))
}

/// DELETE /api/v1/references/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<()>>, ApiFailure> {
    state
        .master
        .delete_reference(&id, actor_id(&headers))
        .await?;
    Ok(Json(ApiResponse::success(())))
}
