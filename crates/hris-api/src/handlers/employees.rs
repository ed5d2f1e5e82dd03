//! Employee CRUD handlers

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use hris_core::domain::Employee;
use hris_core::services::{CreateEmployeeInput, UpdateEmployeeInput};
use hris_shared::types::Pagination;

use crate::error::ApiFailure;
use crate::handlers::actor_id;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EmployeeListQuery {
    pub division_id: Option<Uuid>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// GET /api/v1/employees?division_id=&page=&per_page=
///
/// The unfiltered listing is paginated; a division filter returns the
/// whole division.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<EmployeeListQuery>,
) -> Result<Json<ApiResponse<Vec<Employee>>>, ApiFailure> {
    let employees = match query.division_id {
        Some(division_id) => state.employees.list_by_division(&division_id).await?,
        None => {
            let page = Pagination::clamped(query.page, query.per_page);
            state.employees.list(&page).await?
        }
    };
    Ok(Json(ApiResponse::success(employees)))
}

/// GET /api/v1/employees/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Employee>>, ApiFailure> {
    let employee = state.employees.get(&id).await?;
    Ok(Json(ApiResponse::success(employee)))
}

/// POST /api/v1/employees
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<CreateEmployeeInput>,
) -> Result<Json<ApiResponse<Employee>>, ApiFailure> {
    let created = state.employees.create(input, actor_id(&headers)).await?;
    Ok(Json(ApiResponse::success(created)))
}

/// PUT /api/v1/employees/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(input): Json<UpdateEmployeeInput>,
) -> Result<Json<ApiResponse<Employee>>, ApiFailure> {
    let updated = state
        .employees
        .update(&id, input, actor_id(&headers))
        .await?;
    Ok(Json(ApiResponse::success(updated)))
}

/// DELETE /api/v1/employees/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<()>>, ApiFailure> {
    state.employees.delete(&id, actor_id(&headers)).await?;
    Ok(Json(ApiResponse::success(())))
}
