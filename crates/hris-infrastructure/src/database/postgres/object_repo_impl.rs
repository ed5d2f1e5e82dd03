// ============================================================================
// HRIS Infrastructure - PostgreSQL Object Repository
// File: crates/hris-infrastructure/src/database/postgres/object_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use hris_core::domain::{AppObject, ObjectStatus};
use hris_core::error::DomainError;
use hris_core::repositories::ObjectRepository;

pub struct PgObjectRepository {
    pool: PgPool,
}

impl PgObjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const OBJECT_COLUMNS: &str = r#"
    id, name, access_name, route, component_ref, is_menu, icon,
    parent_id, sort_order, status,
    created_at, created_by, modified_at, modified_by, removed_at, removed_by
"#;

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct AppObjectRow {
    pub id: Uuid,
    pub name: String,
    pub access_name: String,
    pub route: Option<String>,
    pub component_ref: Option<String>,
    pub is_menu: bool,
    pub icon: Option<String>,
    pub parent_id: Option<Uuid>,
    pub sort_order: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub modified_at: Option<DateTime<Utc>>,
    pub modified_by: Option<Uuid>,
    pub removed_at: Option<DateTime<Utc>>,
    pub removed_by: Option<Uuid>,
}

impl From<AppObjectRow> for AppObject {
    fn from(row: AppObjectRow) -> Self {
        AppObject {
            id: row.id,
            name: row.name,
            access_name: row.access_name,
            route: row.route,
            component_ref: row.component_ref,
            is_menu: row.is_menu,
            icon: row.icon,
            parent_id: row.parent_id,
            sort_order: row.sort_order,
            status: ObjectStatus::from_str(&row.status).unwrap_or_default(),
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
impl ObjectRepository for PgObjectRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<AppObject>, DomainError> {
        let row: Option<AppObjectRow> = sqlx::query_as(&format!(
            "SELECT {OBJECT_COLUMNS} FROM app_objects WHERE id = $1 AND removed_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding object by id: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_access_name(
        &self,
        access_name: &str,
    ) -> Result<Option<AppObject>, DomainError> {
        let row: Option<AppObjectRow> = sqlx::query_as(&format!(
            "SELECT {OBJECT_COLUMNS} FROM app_objects \
             WHERE LOWER(access_name) = LOWER($1) AND removed_at IS NULL"
        ))
        .bind(access_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding object by access_name: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_all(&self) -> Result<Vec<AppObject>, DomainError> {
        let rows: Vec<AppObjectRow> = sqlx::query_as(&format!(
            "SELECT {OBJECT_COLUMNS} FROM app_objects \
             WHERE removed_at IS NULL ORDER BY parent_id NULLS FIRST, sort_order, name"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing objects: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn list_children(&self, parent_id: Option<Uuid>) -> Result<Vec<AppObject>, DomainError> {
        let rows: Vec<AppObjectRow> = sqlx::query_as(&format!(
            "SELECT {OBJECT_COLUMNS} FROM app_objects \
             WHERE parent_id IS NOT DISTINCT FROM $1 AND removed_at IS NULL \
             ORDER BY sort_order, name"
        ))
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing object children: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn create(&self, object: &AppObject) -> Result<AppObject, DomainError> {
        let row: AppObjectRow = sqlx::query_as(&format!(
            "INSERT INTO app_objects ( \
                id, name, access_name, route, component_ref, is_menu, icon, \
                parent_id, sort_order, status, \
                created_at, created_by, modified_at, modified_by, removed_at, removed_by \
            ) \
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
            RETURNING {OBJECT_COLUMNS}"
        ))
        .bind(object.id)
        .bind(&object.name)
        .bind(&object.access_name)
        .bind(&object.route)
        .bind(&object.component_ref)
        .bind(object.is_menu)
        .bind(&object.icon)
        .bind(object.parent_id)
        .bind(object.sort_order)
        .bind(object.status.as_str())
        .bind(object.created_at)
        .bind(object.created_by)
        .bind(object.modified_at)
        .bind(object.modified_by)
        .bind(object.removed_at)
        .bind(object.removed_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating object: {}", e);
            let msg = e.to_string();
            if msg.contains("unique") || msg.contains("duplicate") {
                DomainError::AccessNameAlreadyExists(object.access_name.clone())
            } else {
                DomainError::DatabaseError(msg)
            }
        })?;

        Ok(row.into())
    }

    async fn create_many(&self, objects: &[AppObject]) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            error!("Database error opening transaction: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        for object in objects {
            sqlx::query(
                "INSERT INTO app_objects ( \
                    id, name, access_name, route, component_ref, is_menu, icon, \
                    parent_id, sort_order, status, \
                    created_at, created_by, modified_at, modified_by, removed_at, removed_by \
                ) \
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)",
            )
            .bind(object.id)
            .bind(&object.name)
            .bind(&object.access_name)
            .bind(&object.route)
            .bind(&object.component_ref)
            .bind(object.is_menu)
            .bind(&object.icon)
            .bind(object.parent_id)
            .bind(object.sort_order)
            .bind(object.status.as_str())
            .bind(object.created_at)
            .bind(object.created_by)
            .bind(object.modified_at)
            .bind(object.modified_by)
            .bind(object.removed_at)
            .bind(object.removed_by)
            .execute(&mut *tx)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error batch-creating objects: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;
        }

        tx.commit().await.map_err(|e| {
            error!("Database error committing object batch: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }

    async fn update(&self, object: &AppObject) -> Result<AppObject, DomainError> {
        let row: AppObjectRow = sqlx::query_as(&format!(
            "UPDATE app_objects \
             SET \
                name = $2, \
                access_name = $3, \
                route = $4, \
                component_ref = $5, \
                is_menu = $6, \
                icon = $7, \
                parent_id = $8, \
                sort_order = $9, \
                status = $10, \
                modified_at = $11, \
                modified_by = $12, \
                removed_at = $13, \
                removed_by = $14 \
             WHERE id = $1 \
             RETURNING {OBJECT_COLUMNS}"
        ))
        .bind(object.id)
        .bind(&object.name)
        .bind(&object.access_name)
        .bind(&object.route)
        .bind(&object.component_ref)
        .bind(object.is_menu)
        .bind(&object.icon)
        .bind(object.parent_id)
        .bind(object.sort_order)
        .bind(object.status.as_str())
        .bind(object.modified_at)
        .bind(object.modified_by)
        .bind(object.removed_at)
        .bind(object.removed_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating object: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }

    async fn update_sort_orders(&self, assignments: &[(Uuid, i32)]) -> Result<(), DomainError> {
        if assignments.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await.map_err(|e| {
            error!("Database error opening transaction: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        for (id, sort_order) in assignments {
            sqlx::query("UPDATE app_objects SET sort_order = $2 WHERE id = $1")
                .bind(id)
                .bind(sort_order)
                .execute(&mut *tx)
                .await
                .map_err(|e: sqlx::Error| {
                    error!("Database error renumbering objects: {}", e);
                    DomainError::DatabaseError(e.to_string())
                })?;
        }

        tx.commit().await.map_err(|e| {
            error!("Database error committing renumbering: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }
}
