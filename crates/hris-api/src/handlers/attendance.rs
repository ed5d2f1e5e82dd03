//! Attendance handlers

use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use hris_core::domain::AttendanceRecord;

use crate::error::ApiFailure;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ClockInRequest {
    pub employee_id: Uuid,
    /// Server time is used when omitted.
    pub at: Option<DateTime<Utc>>,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ClockOutRequest {
    pub employee_id: Uuid,
    pub at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct AttendanceListQuery {
    pub employee_id: Uuid,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// POST /api/v1/attendance/clock-in
pub async fn clock_in(
    State(state): State<AppState>,
    Json(input): Json<ClockInRequest>,
) -> Result<Json<ApiResponse<AttendanceRecord>>, ApiFailure> {
    let at = input.at.unwrap_or_else(Utc::now);
    let record = state
        .attendance
        .clock_in(&input.employee_id, at, input.note)
        .await?;
    Ok(Json(ApiResponse::success(record)))
}

/// POST /api/v1/attendance/clock-out
pub async fn clock_out(
    State(state): State<AppState>,
    Json(input): Json<ClockOutRequest>,
) -> Result<Json<ApiResponse<AttendanceRecord>>, ApiFailure> {
    let at = input.at.unwrap_or_else(Utc::now);
    let record = state.attendance.clock_out(&input.employee_id, at).await?;
    Ok(Json(ApiResponse::success(record)))
}

/// GET /api/v1/attendance?employee_id=&from=&to=
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<AttendanceListQuery>,
) -> Result<Json<ApiResponse<Vec<AttendanceRecord>>>, ApiFailure> {
    let records = state
        .attendance
        .list_for_range(&query.employee_id, query.from, query.to)
        .await?;
    Ok(Json(ApiResponse::success(records)))
}
