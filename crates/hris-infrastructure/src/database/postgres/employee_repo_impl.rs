// ============================================================================
// HRIS Infrastructure - PostgreSQL Employee Repository
// File: crates/hris-infrastructure/src/database/postgres/employee_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use hris_core::domain::{Employee, EmployeeStatus};
use hris_core::error::DomainError;
use hris_core::repositories::EmployeeRepository;
use hris_shared::types::Pagination;

pub struct PgEmployeeRepository {
    pool: PgPool,
}

impl PgEmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct EmployeeRow {
    pub id: Uuid,
    pub employee_number: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub division_id: Uuid,
    pub position_id: Uuid,
    pub join_date: NaiveDate,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub modified_at: Option<DateTime<Utc>>,
    pub modified_by: Option<Uuid>,
    pub removed_at: Option<DateTime<Utc>>,
    pub removed_by: Option<Uuid>,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee {
            id: row.id,
            employee_number: row.employee_number,
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
            division_id: row.division_id,
            position_id: row.position_id,
            join_date: row.join_date,
            status: EmployeeStatus::from_str(&row.status).unwrap_or_default(),
            created_at: row.created_at,
            created_by: row.created_by,
            modified_at: row.modified_at,
            modified_by: row.modified_by,
            removed_at: row.removed_at,
            removed_by: row.removed_by,
        }
    }
}

#[async_trait]
impl EmployeeRepository for PgEmployeeRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Employee>, DomainError> {
        let row: Option<EmployeeRow> = sqlx::query_as(
            r#"
            SELECT
                id, employee_number, full_name, email, phone,
                division_id, position_id, join_date, status,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            FROM employees
            WHERE id = $1 AND removed_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding employee by id: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_number(&self, employee_number: &str) -> Result<Option<Employee>, DomainError> {
        let row: Option<EmployeeRow> = sqlx::query_as(
            r#"
            SELECT
                id, employee_number, full_name, email, phone,
                division_id, position_id, join_date, status,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            FROM employees
            WHERE LOWER(employee_number) = LOWER($1) AND removed_at IS NULL
            "#,
        )
        .bind(employee_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding employee by number: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, DomainError> {
        let row: Option<EmployeeRow> = sqlx::query_as(
            r#"
            SELECT
                id, employee_number, full_name, email, phone,
                division_id, position_id, join_date, status,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            FROM employees
            WHERE LOWER(email) = LOWER($1) AND removed_at IS NULL
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding employee by email: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_all(&self, page: &Pagination) -> Result<Vec<Employee>, DomainError> {
        let rows: Vec<EmployeeRow> = sqlx::query_as(
            r#"
            SELECT
                id, employee_number, full_name, email, phone,
                division_id, position_id, join_date, status,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            FROM employees
            WHERE removed_at IS NULL
            ORDER BY employee_number
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing employees: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn list_by_division(&self, division_id: &Uuid) -> Result<Vec<Employee>, DomainError> {
        let rows: Vec<EmployeeRow> = sqlx::query_as(
            r#"
            SELECT
                id, employee_number, full_name, email, phone,
                division_id, position_id, join_date, status,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            FROM employees
            WHERE division_id = $1 AND removed_at IS NULL
            ORDER BY employee_number
            "#,
        )
        .bind(division_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing employees by division: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn create(&self, employee: &Employee) -> Result<Employee, DomainError> {
        info!("Creating employee {}", employee.employee_number);

        let row: EmployeeRow = sqlx::query_as(
            r#"
            INSERT INTO employees (
                id, employee_number, full_name, email, phone,
                division_id, position_id, join_date, status,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING
                id, employee_number, full_name, email, phone,
                division_id, position_id, join_date, status,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            "#,
        )
        .bind(employee.id)
        .bind(&employee.employee_number)
        .bind(&employee.full_name)
        .bind(&employee.email)
        .bind(&employee.phone)
        .bind(employee.division_id)
        .bind(employee.position_id)
        .bind(employee.join_date)
        .bind(employee.status.as_str())
        .bind(employee.created_at)
        .bind(employee.created_by)
        .bind(employee.modified_at)
        .bind(employee.modified_by)
        .bind(employee.removed_at)
        .bind(employee.removed_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating employee: {}", e);
            let msg = e.to_string();
            if msg.contains("unique") || msg.contains("duplicate") {
                if msg.contains("email") {
                    DomainError::EmailAlreadyExists(employee.email.clone())
                } else {
                    DomainError::EmployeeNumberAlreadyExists(employee.employee_number.clone())
                }
            } else {
                DomainError::DatabaseError(msg)
            }
        })?;

        Ok(row.into())
    }

    async fn update(&self, employee: &Employee) -> Result<Employee, DomainError> {
        let row: EmployeeRow = sqlx::query_as(
            r#"
            UPDATE employees
            SET
                full_name = $2,
                email = $3,
                phone = $4,
                division_id = $5,
                position_id = $6,
                status = $7,
                modified_at = $8,
                modified_by = $9,
                removed_at = $10,
                removed_by = $11
            WHERE id = $1
            RETURNING
                id, employee_number, full_name, email, phone,
                division_id, position_id, join_date, status,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            "#,
        )
        .bind(employee.id)
        .bind(&employee.full_name)
        .bind(&employee.email)
        .bind(&employee.phone)
        .bind(employee.division_id)
        .bind(employee.position_id)
        .bind(employee.status.as_str())
        .bind(employee.modified_at)
        .bind(employee.modified_by)
        .bind(employee.removed_at)
        .bind(employee.removed_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating employee: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }
}
