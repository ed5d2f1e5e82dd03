//! Object repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::AppObject;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<AppObject>, DomainError>;
    async fn find_by_access_name(&self, access_name: &str) -> Result<Option<AppObject>, DomainError>;
    /// All non-removed objects, active and inactive.
    async fn list_all(&self) -> Result<Vec<AppObject>, DomainError>;
    /// Non-removed children of a parent group; `None` lists the roots.
    async fn list_children(&self, parent_id: Option<Uuid>) -> Result<Vec<AppObject>, DomainError>;
    async fn create(&self, object: &AppObject) -> Result<AppObject, DomainError>;
    /// Batch insert, used when copying a node together with its children.
    async fn create_many(&self, objects: &[AppObject]) -> Result<(), DomainError>;
    async fn update(&self, object: &AppObject) -> Result<AppObject, DomainError>;
    async fn update_sort_orders(&self, assignments: &[(Uuid, i32)]) -> Result<(), DomainError>;
}
