//! Division and position master data handlers

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use hris_core::domain::{Division, Position};
use hris_core::services::{DivisionInput, PositionInput};

use crate::error::ApiFailure;
use crate::handlers::actor_id;
use crate::response::ApiResponse;
use crate::state::AppState;

// ----------------------------------------------------------------------
// Divisions
// ----------------------------------------------------------------------

/// GET /api/v1/divisions
pub async fn list_divisions(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Division>>>, ApiFailure> {
    let divisions = state.master.list_divisions().await?;
    Ok(Json(ApiResponse::success(divisions)))
}

/// GET /api/v1/divisions/{id}
pub async fn get_division(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Division>>, ApiFailure> {
    let division = state.master.get_division(&id).await?;
    Ok(Json(ApiResponse::success(division)))
}

/// POST /api/v1/divisions
pub async fn create_division(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<DivisionInput>,
) -> Result<Json<ApiResponse<Division>>, ApiFailure> {
    let created = state
        .master
        .create_division(input, actor_id(&headers))
        .await?;
    Ok(Json(ApiResponse::success(created)))
}

/// PUT /api/v1/divisions/{id}
pub async fn update_division(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(input): Json<DivisionInput>,
) -> Result<Json<ApiResponse<Division>>, ApiFailure> {
    let updated = state
        .master
        .update_division(&id, input, actor_id(&headers))
        .await?;
    Ok(Json(ApiResponse::success(updated)))
}

/// DELETE /api/v1/divisions/{id}
pub async fn delete_division(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<()>>, ApiFailure> {
    state
        .master
        .delete_division(&id, actor_id(&headers))
        .await?;
    Ok(Json(ApiResponse::success(())))
}

// ----------------------------------------------------------------------
// Positions
// ----------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PositionListQuery {
    pub division_id: Option<Uuid>,
}

/// GET /api/v1/positions?division_id=
pub async fn list_positions(
    State(state): State<AppState>,
    Query(query): Query<PositionListQuery>,
) -> Result<Json<ApiResponse<Vec<Position>>>, ApiFailure> {
    let positions = match query.division_id {
        Some(division_id) => state.master.list_positions_by_division(&division_id).await?,
        None => state.master.list_positions().await?,
    };
    Ok(Json(ApiResponse::success(positions)))
}

/// GET /api/v1/positions/{id}
pub async fn get_position(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Position>>, ApiFailure> {
    let position = state.master.get_position(&id).await?;
    Ok(Json(ApiResponse::success(position)))
}

/// POST /api/v1/positions
pub async fn create_position(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<PositionInput>,
) -> Result<Json<ApiResponse<Position>>, ApiFailure> {
    let created = state
        .master
        .create_position(input, actor_id(&headers))
        .await?;
    Ok(Json(ApiResponse::success(created)))
}

/// PUT /api/v1/positions/{id}
pub async fn update_position(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(input): Json<PositionInput>,
) -> Result<Json<ApiResponse<Position>>, ApiFailure> {
    let updated = state
        .master
        .update_position(&id, input, actor_id(&headers))
        .await?;
    Ok(Json(ApiResponse::success(updated)))
}

/// DELETE /api/v1/positions/{id}
pub async fn delete_position(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<()>>, ApiFailure> {
    state
        .master
        .delete_position(&id, actor_id(&headers))
        .await?;
    Ok(Json(ApiResponse::success(())))
}
