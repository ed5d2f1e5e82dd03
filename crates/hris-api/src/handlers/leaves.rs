//! Leave request handlers

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use hris_core::domain::LeaveRequest;
use hris_core::services::SubmitLeaveInput;

use crate::error::ApiFailure;
use crate::handlers::actor_id;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LeaveListQuery {
    pub employee_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    pub decided_by: Uuid,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CancelRequest {
    pub cancelled_by: Uuid,
}

/// GET /api/v1/leaves?employee_id=
///
/// With an employee filter, that employee's full history; without one, the
/// requests still awaiting a decision.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<LeaveListQuery>,
) -> Result<Json<ApiResponse<Vec<LeaveRequest>>>, ApiFailure> {
    let leaves = match query.employee_id {
        Some(employee_id) => state.leaves.list_by_employee(&employee_id).await?,
        None => state.leaves.list_pending().await?,
    };
    Ok(Json(ApiResponse::success(leaves)))
}

/// GET /api/v1/leaves/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<LeaveRequest>>, ApiFailure> {
    let request = state.leaves.get(&id).await?;
    Ok(Json(ApiResponse::success(request)))
}

/// POST /api/v1/leaves
pub async fn submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<SubmitLeaveInput>,
) -> Result<Json<ApiResponse<LeaveRequest>>, ApiFailure> {
    let created = state.leaves.submit(input, actor_id(&headers)).await?;
    Ok(Json(ApiResponse::success(created)))
}

/// POST /api/v1/leaves/{id}/approve
pub async fn approve(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<DecisionRequest>,
) -> Result<Json<ApiResponse<LeaveRequest>>, ApiFailure> {
    let updated = state
        .leaves
        .approve(&id, input.decided_by, input.note)
        .await?;
    Ok(Json(ApiResponse::success(updated)))
}

/// POST /api/v1/leaves/{id}/reject
pub async fn reject(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<DecisionRequest>,
) -> Result<Json<ApiResponse<LeaveRequest>>, ApiFailure> {
    let updated = state
        .leaves
        .reject(&id, input.decided_by, input.note)
        .await?;
    Ok(Json(ApiResponse::success(updated)))
}

/// POST /api/v1/leaves/{id}/cancel
pub async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<CancelRequest>,
) -> Result<Json<ApiResponse<LeaveRequest>>, ApiFailure> {
    let updated = state.leaves.cancel(&id, input.cancelled_by).await?;
    Ok(Json(ApiResponse::success(updated)))
}
