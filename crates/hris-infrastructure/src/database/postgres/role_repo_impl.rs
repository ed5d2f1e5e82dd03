// ============================================================================
// HRIS Infrastructure - PostgreSQL Role Repositories
// File: crates/hris-infrastructure/src/database/postgres/role_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use hris_core::domain::{Role, RoleAccess};
use hris_core::error::DomainError;
use hris_core::repositories::{RoleAccessRepository, RoleRepository};

pub struct PgRoleRepository {
    pool: PgPool,
}

impl PgRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct RoleRow {
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

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Role {
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
impl RoleRepository for PgRoleRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Role>, DomainError> {
        let row: Option<RoleRow> = sqlx::query_as(
            r#"
            SELECT
                id, name, description, is_active,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            FROM roles
            WHERE id = $1 AND removed_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding role by id: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, DomainError> {
        let row: Option<RoleRow> = sqlx::query_as(
            r#"
            SELECT
                id, name, description, is_active,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            FROM roles
            WHERE LOWER(name) = LOWER($1) AND removed_at IS NULL
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding role by name: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_all(&self) -> Result<Vec<Role>, DomainError> {
        let rows: Vec<RoleRow> = sqlx::query_as(
            r#"
            SELECT
                id, name, description, is_active,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            FROM roles
            WHERE removed_at IS NULL
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing roles: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn create(&self, role: &Role) -> Result<Role, DomainError> {
        let row: RoleRow = sqlx::query_as(
            r#"
            INSERT INTO roles (
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
        .bind(role.id)
        .bind(&role.name)
        .bind(&role.description)
        .bind(role.is_active)
        .bind(role.created_at)
        .bind(role.created_by)
        .bind(role.modified_at)
        .bind(role.modified_by)
        .bind(role.removed_at)
        .bind(role.removed_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating role: {}", e);
            let msg = e.to_string();
            if msg.contains("unique") || msg.contains("duplicate") {
                DomainError::RoleNameAlreadyExists(role.name.clone())
            } else {
                DomainError::DatabaseError(msg)
            }
        })?;

        Ok(row.into())
    }

    async fn update(&self, role: &Role) -> Result<Role, DomainError> {
        let row: RoleRow = sqlx::query_as(
            r#"
            UPDATE roles
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
        .bind(role.id)
        .bind(&role.name)
        .bind(&role.description)
        .bind(role.is_active)
        .bind(role.modified_at)
        .bind(role.modified_by)
        .bind(role.removed_at)
        .bind(role.removed_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating role: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }
}

pub struct PgRoleAccessRepository {
    pool: PgPool,
}

impl PgRoleAccessRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleAccessRepository for PgRoleAccessRepository {
    async fn list_object_ids(&self, role_id: &Uuid) -> Result<Vec<Uuid>, DomainError> {
        let ids: Vec<(Uuid,)> = sqlx::query_as(
            "SELECT object_id FROM role_object_access WHERE role_id = $1",
        )
        .bind(role_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing role access: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(ids.into_iter().map(|(id,)| id).collect())
    }

    async fn replace_for_role(
        &self,
        role_id: &Uuid,
        object_ids: &[Uuid],
        saved_by: Option<Uuid>,
    ) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            error!("Database error opening transaction: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        sqlx::query("DELETE FROM role_object_access WHERE role_id = $1")
            .bind(role_id)
            .execute(&mut *tx)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error clearing role access: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        for object_id in object_ids {
            let grant = RoleAccess::new(*role_id, *object_id, saved_by);
            sqlx::query(
                r#"
                INSERT INTO role_object_access (id, role_id, object_id, created_at, created_by)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(grant.id)
            .bind(grant.role_id)
            .bind(grant.object_id)
            .bind(grant.created_at)
            .bind(grant.created_by)
            .execute(&mut *tx)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error inserting role access: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;
        }

        tx.commit().await.map_err(|e| {
            error!("Database error committing role access: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        info!("Role access replaced for role {}: {} grants", role_id, object_ids.len());
        Ok(())
    }
}
