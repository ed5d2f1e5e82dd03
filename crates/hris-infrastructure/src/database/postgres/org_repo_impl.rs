// ============================================================================
// HRIS Infrastructure - PostgreSQL Division/Position Repositories
// File: crates/hris-infrastructure/src/database/postgres/org_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use hris_core::domain::{Division, Position};
use hris_core::error::DomainError;
use hris_core::repositories::{DivisionRepository, PositionRepository};

pub struct PgDivisionRepository {
    pool: PgPool,
}

impl PgDivisionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct DivisionRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub modified_at: Option<DateTime<Utc>>,
    pub modified_by: Option<Uuid>,
    pub removed_at: Option<DateTime<Utc>>,
    pub removed_by: Option<Uuid>,
}

impl From<DivisionRow> for Division {
    fn from(row: DivisionRow) -> Self {
        Division {
            id: row.id,
            name: row.name,
            description: row.description,
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
impl DivisionRepository for PgDivisionRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Division>, DomainError> {
        let row: Option<DivisionRow> = sqlx::query_as(
            r#"
            SELECT
                id, name, description, is_active,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            FROM divisions
            WHERE id = $1 AND removed_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding division by id: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Division>, DomainError> {
        let row: Option<DivisionRow> = sqlx::query_as(
            r#"
            SELECT
                id, name, description, is_active,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            FROM divisions
            WHERE LOWER(name) = LOWER($1) AND removed_at IS NULL
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding division by name: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_all(&self) -> Result<Vec<Division>, DomainError> {
        let rows: Vec<DivisionRow> = sqlx::query_as(
            r#"
            SELECT
                id, name, description, is_active,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            FROM divisions
            WHERE removed_at IS NULL
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing divisions: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn create(&self, division: &Division) -> Result<Division, DomainError> {
        let row: DivisionRow = sqlx::query_as(
            r#"
            INSERT INTO divisions (
                id, name, description, is_active,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING
                id, name, description, is_active,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            "#,
        )
        .bind(division.id)
        .bind(&division.name)
        .bind(&division.description)
        .bind(division.is_active)
        .bind(division.created_at)
        .bind(division.created_by)
        .bind(division.modified_at)
        .bind(division.modified_by)
        .bind(division.removed_at)
        .bind(division.removed_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating division: {}", e);
            let msg = e.to_string();
            if msg.contains("unique") || msg.contains("duplicate") {
                DomainError::DivisionNameAlreadyExists(division.name.clone())
            } else {
                DomainError::DatabaseError(msg)
            }
        })?;

        Ok(row.into())
    }

    async fn update(&self, division: &Division) -> Result<Division, DomainError> {
        let row: DivisionRow = sqlx::query_as(
            r#"
            UPDATE divisions
            SET
                name = $2,
                description = $3,
                is_active = $4,
                modified_at = $5,
                modified_by = $6,
                removed_at = $7,
                removed_by = $8
            WHERE id = $1
            RETURNING
                id, name, description, is_active,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            "#,
        )
        .bind(division.id)
        .bind(&division.name)
        .bind(&division.description)
        .bind(division.is_active)
        .bind(division.modified_at)
        .bind(division.modified_by)
        .bind(division.removed_at)
        .bind(division.removed_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating division: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }
}

pub struct PgPositionRepository {
    pool: PgPool,
}

impl PgPositionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct PositionRow {
    pub id: Uuid,
    pub division_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub modified_at: Option<DateTime<Utc>>,
    pub modified_by: Option<Uuid>,
    pub removed_at: Option<DateTime<Utc>>,
    pub removed_by: Option<Uuid>,
}

impl From<PositionRow> for Position {
    fn from(row: PositionRow) -> Self {
        Position {
            id: row.id,
            division_id: row.division_id,
            name: row.name,
            description: row.description,
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
impl PositionRepository for PgPositionRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Position>, DomainError> {
        let row: Option<PositionRow> = sqlx::query_as(
            r#"
            SELECT
                id, division_id, name, description, is_active,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            FROM positions
            WHERE id = $1 AND removed_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding position by id: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_name(
        &self,
        division_id: &Uuid,
        name: &str,
    ) -> Result<Option<Position>, DomainError> {
        let row: Option<PositionRow> = sqlx::query_as(
            r#"
            SELECT
                id, division_id, name, description, is_active,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            FROM positions
            WHERE division_id = $1 AND LOWER(name) = LOWER($2) AND removed_at IS NULL
            "#,
        )
        .bind(division_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding position by name: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_all(&self) -> Result<Vec<Position>, DomainError> {
        let rows: Vec<PositionRow> = sqlx::query_as(
            r#"
            SELECT
                id, division_id, name, description, is_active,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            FROM positions
            WHERE removed_at IS NULL
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing positions: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn list_by_division(&self, division_id: &Uuid) -> Result<Vec<Position>, DomainError> {
        let rows: Vec<PositionRow> = sqlx::query_as(
            r#"
            SELECT
                id, division_id, name, description, is_active,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            FROM positions
            WHERE division_id = $1 AND removed_at IS NULL
            ORDER BY name
            "#,
        )
        .bind(division_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing positions by division: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn create(&self, position: &Position) -> Result<Position, DomainError> {
        let row: PositionRow = sqlx::query_as(
            r#"
            INSERT INTO positions (
                id, division_id, name, description, is_active,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING
                id, division_id, name, description, is_active,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            "#,
        )
        .bind(position.id)
        .bind(position.division_id)
        .bind(&position.name)
        .bind(&position.description)
        .bind(position.is_active)
        .bind(position.created_at)
        .bind(position.created_by)
        .bind(position.modified_at)
        .bind(position.modified_by)
        .bind(position.removed_at)
        .bind(position.removed_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating position: {}", e);
            let msg = e.to_string();
            if msg.contains("unique") || msg.contains("duplicate") {
                DomainError::PositionNameAlreadyExists(position.name.clone())
            } else {
                DomainError::DatabaseError(msg)
            }
        })?;

        Ok(row.into())
    }

    async fn update(&self, position: &Position) -> Result<Position, DomainError> {
        let row: PositionRow = sqlx::query_as(
            r#"
            UPDATE positions
            SET
                division_id = $2,
                name = $3,
                description = $4,
                is_active = $5,
                modified_at = $6,
                modified_by = $7,
                removed_at = $8,
                removed_by = $9
            WHERE id = $1
            RETURNING
                id, division_id, name, description, is_active,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            "#,
        )
        .bind(position.id)
        .bind(position.division_id)
        .bind(&position.name)
        .bind(&position.description)
        .bind(position.is_active)
        .bind(position.modified_at)
        .bind(position.modified_by)
        .bind(position.removed_at)
        .bind(position.removed_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating position: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }
}
