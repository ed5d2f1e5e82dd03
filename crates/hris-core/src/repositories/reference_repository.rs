//! Reference configuration repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ReferenceItem;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferenceRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<ReferenceItem>, DomainError>;
    async fn find_by_key(
        &self,
        group_key: &str,
        item_key: &str,
    ) -> Result<Option<ReferenceItem>, DomainError>;
    async fn list_by_group(&self, group_key: &str) -> Result<Vec<ReferenceItem>, DomainError>;
    async fn create(&self, item: &ReferenceItem) -> Result<ReferenceItem, DomainError>;
    async fn update(&self, item: &ReferenceItem) -> Result<ReferenceItem, DomainError>;
}
