// ============================================================================
// HRIS Infrastructure - PostgreSQL App User Repository
// File: crates/hris-infrastructure/src/database/postgres/user_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use hris_core::domain::AppUser;
use hris_core::error::DomainError;
use hris_core::repositories::AppUserRepository;

pub struct PgAppUserRepository {
    pool: PgPool,
}

impl PgAppUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct AppUserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub employee_id: Option<Uuid>,
    pub role_id: Uuid,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub modified_at: Option<DateTime<Utc>>,
    pub modified_by: Option<Uuid>,
    pub removed_at: Option<DateTime<Utc>>,
    pub removed_by: Option<Uuid>,
}

impl From<AppUserRow> for AppUser {
    fn from(row: AppUserRow) -> Self {
        AppUser {
            id: row.id,
            username: row.username,
            email: row.email,
            employee_id: row.employee_id,
            role_id: row.role_id,
            is_active: row.is_active,
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
impl AppUserRepository for PgAppUserRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<AppUser>, DomainError> {
        let row: Option<AppUserRow> = sqlx::query_as(
            r#"
            SELECT
                id, username, email, employee_id, role_id, is_active,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            FROM app_users
            WHERE id = $1 AND removed_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding user by id: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<AppUser>, DomainError> {
        let row: Option<AppUserRow> = sqlx::query_as(
            r#"
            SELECT
                id, username, email, employee_id, role_id, is_active,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            FROM app_users
            WHERE LOWER(username) = LOWER($1) AND removed_at IS NULL
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding user by username: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_all(&self) -> Result<Vec<AppUser>, DomainError> {
        let rows: Vec<AppUserRow> = sqlx::query_as(
            r#"
            SELECT
                id, username, email, employee_id, role_id, is_active,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            FROM app_users
            WHERE removed_at IS NULL
            ORDER BY username
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing users: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn count_by_role(&self, role_id: &Uuid) -> Result<i64, DomainError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM app_users WHERE role_id = $1 AND removed_at IS NULL",
        )
        .bind(role_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error counting users by role: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(count)
    }

    async fn create(&self, user: &AppUser) -> Result<AppUser, DomainError> {
        let row: AppUserRow = sqlx::query_as(
            r#"
            INSERT INTO app_users (
                id, username, email, employee_id, role_id, is_active,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING
                id, username, email, employee_id, role_id, is_active,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.employee_id)
        .bind(user.role_id)
        .bind(user.is_active)
        .bind(user.created_at)
        .bind(user.created_by)
        .bind(user.modified_at)
        .bind(user.modified_by)
        .bind(user.removed_at)
        .bind(user.removed_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating user: {}", e);
            let msg = e.to_string();
            if msg.contains("unique") || msg.contains("duplicate") {
                DomainError::UsernameAlreadyExists(user.username.clone())
            } else {
                DomainError::DatabaseError(msg)
            }
        })?;

        Ok(row.into())
    }

    async fn update(&self, user: &AppUser) -> Result<AppUser, DomainError> {
        let row: AppUserRow = sqlx::query_as(
            r#"
            UPDATE app_users
            SET
                email = $2,
                employee_id = $3,
                role_id = $4,
                is_active = $5,
                modified_at = $6,
                modified_by = $7,
                removed_at = $8,
                removed_by = $9
            WHERE id = $1
            RETURNING
                id, username, email, employee_id, role_id, is_active,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(user.employee_id)
        .bind(user.role_id)
        .bind(user.is_active)
        .bind(user.modified_at)
        .bind(user.modified_by)
        .bind(user.removed_at)
        .bind(user.removed_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating user: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }
}
