// ============================================================================
// HRIS Infrastructure - PostgreSQL Reference Repository
// File: crates/hris-infrastructure/src/database/postgres/reference_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use hris_core::domain::ReferenceItem;
use hris_core::error::DomainError;
use hris_core::repositories::ReferenceRepository;

pub struct PgReferenceRepository {
    pool: PgPool,
}

impl PgReferenceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct ReferenceItemRow {
    pub id: Uuid,
    pub group_key: String,
    pub item_key: String,
    pub value: String,
    pub label: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub modified_at: Option<DateTime<Utc>>,
    pub modified_by: Option<Uuid>,
    pub removed_at: Option<DateTime<Utc>>,
    pub removed_by: Option<Uuid>,
}

impl From<ReferenceItemRow> for ReferenceItem {
    fn from(row: ReferenceItemRow) -> Self {
        ReferenceItem {
            id: row.id,
            group_key: row.group_key,
            item_key: row.item_key,
            value: row.value,
            label: row.label,
            sort_order: row.sort_order,
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
impl ReferenceRepository for PgReferenceRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<ReferenceItem>, DomainError> {
        let row: Option<ReferenceItemRow> = sqlx::query_as(
            r#"
            SELECT
                id, group_key, item_key, value, label, sort_order, is_active,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            FROM reference_items
            WHERE id = $1 AND removed_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding reference by id: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_key(
        &self,
        group_key: &str,
        item_key: &str,
    ) -> Result<Option<ReferenceItem>, DomainError> {
        let row: Option<ReferenceItemRow> = sqlx::query_as(
            r#"
            SELECT
                id, group_key, item_key, value, label, sort_order, is_active,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            FROM reference_items
            WHERE group_key = $1 AND item_key = $2 AND removed_at IS NULL
            "#,
        )
        .bind(group_key)
        .bind(item_key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding reference by key: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_by_group(&self, group_key: &str) -> Result<Vec<ReferenceItem>, DomainError> {
        let rows: Vec<ReferenceItemRow> = sqlx::query_as(
            r#"
            SELECT
                id, group_key, item_key, value, label, sort_order, is_active,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            FROM reference_items
            WHERE group_key = $1 AND removed_at IS NULL
            ORDER BY sort_order, item_key
            "#,
        )
        .bind(group_key)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing references: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn create(&self, item: &ReferenceItem) -> Result<ReferenceItem, DomainError> {
        let row: ReferenceItemRow = sqlx::query_as(
            r#"
            INSERT INTO reference_items (
                id, group_key, item_key, value, label, sort_order, is_active,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING
                id, group_key, item_key, value, label, sort_order, is_active,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            "#,
        )
        .bind(item.id)
        .bind(&item.group_key)
        .bind(&item.item_key)
        .bind(&item.value)
        .bind(&item.label)
        .bind(item.sort_order)
        .bind(item.is_active)
        .bind(item.created_at)
        .bind(item.created_by)
        .bind(item.modified_at)
        .bind(item.modified_by)
        .bind(item.removed_at)
        .bind(item.removed_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating reference: {}", e);
            let msg = e.to_string();
            if msg.contains("unique") || msg.contains("duplicate") {
                DomainError::ReferenceKeyAlreadyExists {
                    group_key: item.group_key.clone(),
                    item_key: item.item_key.clone(),
                }
            } else {
                DomainError::DatabaseError(msg)
            }
        })?;

        Ok(row.into())
    }

    async fn update(&self, item: &ReferenceItem) -> Result<ReferenceItem, DomainError> {
        let row: ReferenceItemRow = sqlx::query_as(
            r#"
            UPDATE reference_items
            SET
                group_key = $2,
                item_key = $3,
                value = $4,
                label = $5,
                sort_order = $6,
                is_active = $7,
                modified_at = $8,
                modified_by = $9,
                removed_at = $10,
                removed_by = $11
            WHERE id = $1
            RETURNING
                id, group_key, item_key, value, label, sort_order, is_active,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            "#,
        )
        .bind(item.id)
        .bind(&item.group_key)
        .bind(&item.item_key)
        .bind(&item.value)
        .bind(&item.label)
        .bind(item.sort_order)
        .bind(item.is_active)
        .bind(item.modified_at)
        .bind(item.modified_by)
        .bind(item.removed_at)
        .bind(item.removed_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating reference: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }
}
