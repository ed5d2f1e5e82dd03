// ============================================================================
// HRIS Infrastructure - PostgreSQL Attendance Repository
// File: crates/hris-infrastructure/src/database/postgres/attendance_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use hris_core::domain::AttendanceRecord;
use hris_core::error::DomainError;
use hris_core::repositories::AttendanceRepository;

pub struct PgAttendanceRepository {
    pool: PgPool,
}

impl PgAttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct AttendanceRow {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub work_date: NaiveDate,
    pub clock_in_at: DateTime<Utc>,
    pub clock_out_at: Option<DateTime<Utc>>,
    pub is_late: bool,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl From<AttendanceRow> for AttendanceRecord {
    fn from(row: AttendanceRow) -> Self {
        AttendanceRecord {
            id: row.id,
            employee_id: row.employee_id,
            work_date: row.work_date,
            clock_in_at: row.clock_in_at,
            clock_out_at: row.clock_out_at,
            is_late: row.is_late,
            note: row.note,
            created_at: row.created_at,
            modified_at: row.modified_at,
        }
    }
}

#[async_trait]
impl AttendanceRepository for PgAttendanceRepository {
    async fn find_for_day(
        &self,
        employee_id: &Uuid,
        work_date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, DomainError> {
        let row: Option<AttendanceRow> = sqlx::query_as(
            r#"
            SELECT
                id, employee_id, work_date, clock_in_at, clock_out_at,
                is_late, note, created_at, modified_at
            FROM attendance_records
            WHERE employee_id = $1 AND work_date = $2
            "#,
        )
        .bind(employee_id)
        .bind(work_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding attendance record: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_for_range(
        &self,
        employee_id: &Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, DomainError> {
        let rows: Vec<AttendanceRow> = sqlx::query_as(
            r#"
            SELECT
                id, employee_id, work_date, clock_in_at, clock_out_at,
                is_late, note, created_at, modified_at
            FROM attendance_records
            WHERE employee_id = $1 AND work_date BETWEEN $2 AND $3
            ORDER BY work_date
            "#,
        )
        .bind(employee_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing attendance records: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn create(&self, record: &AttendanceRecord) -> Result<AttendanceRecord, DomainError> {
        let row: AttendanceRow = sqlx::query_as(
            r#"
            INSERT INTO attendance_records (
                id, employee_id, work_date, clock_in_at, clock_out_at,
                is_late, note, created_at, modified_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING
                id, employee_id, work_date, clock_in_at, clock_out_at,
                is_late, note, created_at, modified_at
            "#,
        )
        .bind(record.id)
        .bind(record.employee_id)
        .bind(record.work_date)
        .bind(record.clock_in_at)
        .bind(record.clock_out_at)
        .bind(record.is_late)
        .bind(&record.note)
        .bind(record.created_at)
        .bind(record.modified_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating attendance record: {}", e);
            let msg = e.to_string();
            if msg.contains("unique") || msg.contains("duplicate") {
                DomainError::AlreadyClockedIn(record.work_date)
            } else {
                DomainError::DatabaseError(msg)
            }
        })?;

        Ok(row.into())
    }

    async fn update(&self, record: &AttendanceRecord) -> Result<AttendanceRecord, DomainError> {
        let row: AttendanceRow = sqlx::query_as(
            r#"
            UPDATE attendance_records
            SET
                clock_out_at = $2,
                is_late = $3,
                note = $4,
                modified_at = $5
            WHERE id = $1
            RETURNING
                id, employee_id, work_date, clock_in_at, clock_out_at,
                is_late, note, created_at, modified_at
            "#,
        )
        .bind(record.id)
        .bind(record.clock_out_at)
        .bind(record.is_late)
        .bind(&record.note)
        .bind(record.modified_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating attendance record: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }
}
