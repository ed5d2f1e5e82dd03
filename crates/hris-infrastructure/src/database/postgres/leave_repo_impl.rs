// ============================================================================
// HRIS Infrastructure - PostgreSQL Leave Repository
// File: crates/hris-infrastructure/src/database/postgres/leave_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use hris_core::domain::{LeaveRequest, LeaveStatus, LeaveType};
use hris_core::error::DomainError;
use hris_core::repositories::LeaveRepository;

pub struct PgLeaveRepository {
    pool: PgPool,
}

impl PgLeaveRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct LeaveRequestRow {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub status: String,
    pub decided_by: Option<Uuid>,
    pub decided_at: Option<DateTime<Utc>>,
    pub decision_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub modified_at: Option<DateTime<Utc>>,
    pub modified_by: Option<Uuid>,
}

impl From<LeaveRequestRow> for LeaveRequest {
    fn from(row: LeaveRequestRow) -> Self {
        LeaveRequest {
            id: row.id,
            employee_id: row.employee_id,
            leave_type: LeaveType::from_str(&row.leave_type).unwrap_or(LeaveType::Annual),
            start_date: row.start_date,
            end_date: row.end_date,
            reason: row.reason,
            status: LeaveStatus::from_str(&row.status).unwrap_or(LeaveStatus::Submitted),
            decided_by: row.decided_by,
            decided_at: row.decided_at,
            decision_note: row.decision_note,
            created_at: row.created_at,
            created_by: row.created_by,
            modified_at: row.modified_at,
            modified_by: row.modified_by,
        }
    }
}

#[async_trait]
impl LeaveRepository for PgLeaveRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<LeaveRequest>, DomainError> {
        let row: Option<LeaveRequestRow> = sqlx::query_as(
            r#"
            SELECT
                id, employee_id, leave_type, start_date, end_date, reason,
                status, decided_by, decided_at, decision_note,
                created_at, created_by, modified_at, modified_by
            FROM leave_requests
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding leave request by id: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_by_employee(
        &self,
        employee_id: &Uuid,
    ) -> Result<Vec<LeaveRequest>, DomainError> {
        let rows: Vec<LeaveRequestRow> = sqlx::query_as(
            r#"
            SELECT
                id, employee_id, leave_type, start_date, end_date, reason,
                status, decided_by, decided_at, decision_note,
                created_at, created_by, modified_at, modified_by
            FROM leave_requests
            WHERE employee_id = $1
            ORDER BY start_date DESC
            "#,
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing leave requests: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn list_by_status(&self, status: LeaveStatus) -> Result<Vec<LeaveRequest>, DomainError> {
        let rows: Vec<LeaveRequestRow> = sqlx::query_as(
            r#"
            SELECT
                id, employee_id, leave_type, start_date, end_date, reason,
                status, decided_by, decided_at, decision_note,
                created_at, created_by, modified_at, modified_by
            FROM leave_requests
            WHERE status = $1
            ORDER BY created_at
            "#,
        )
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing leave requests by status: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn find_overlapping(
        &self,
        employee_id: &Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<LeaveRequest>, DomainError> {
        let rows: Vec<LeaveRequestRow> = sqlx::query_as(
            r#"
            SELECT
                id, employee_id, leave_type, start_date, end_date, reason,
                status, decided_by, decided_at, decision_note,
                created_at, created_by, modified_at, modified_by
            FROM leave_requests
            WHERE employee_id = $1 AND start_date <= $3 AND end_date >= $2
            "#,
        )
        .bind(employee_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding overlapping leave requests: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn create(&self, request: &LeaveRequest) -> Result<LeaveRequest, DomainError> {
        let row: LeaveRequestRow = sqlx::query_as(
            r#"
            INSERT INTO leave_requests (
                id, employee_id, leave_type, start_date, end_date, reason,
                status, decided_by, decided_at, decision_note,
                created_at, created_by, modified_at, modified_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING
                id, employee_id, leave_type, start_date, end_date, reason,
                status, decided_by, decided_at, decision_note,
                created_at, created_by, modified_at, modified_by
            "#,
        )
        .bind(request.id)
        .bind(request.employee_id)
        .bind(request.leave_type.as_str())
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(&request.reason)
        .bind(request.status.as_str())
        .bind(request.decided_by)
        .bind(request.decided_at)
        .bind(&request.decision_note)
        .bind(request.created_at)
        .bind(request.created_by)
        .bind(request.modified_at)
        .bind(request.modified_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating leave request: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }

    async fn update(&self, request: &LeaveRequest) -> Result<LeaveRequest, DomainError> {
        let row: LeaveRequestRow = sqlx::query_as(
            r#"
            UPDATE leave_requests
            SET
                leave_type = $2,
                start_date = $3,
                end_date = $4,
                reason = $5,
                status = $6,
                decided_by = $7,
                decided_at = $8,
                decision_note = $9,
                modified_at = $10,
                modified_by = $11
            WHERE id = $1
            RETURNING
                id, employee_id, leave_type, start_date, end_date, reason,
                status, decided_by, decided_at, decision_note,
                created_at, created_by, modified_at, modified_by
            "#,
        )
        .bind(request.id)
        .bind(request.leave_type.as_str())
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(&request.reason)
        .bind(request.status.as_str())
        .bind(request.decided_by)
        .bind(request.decided_at)
        .bind(&request.decision_note)
        .bind(request.modified_at)
        .bind(request.modified_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating leave request: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }
}
