//! Role and role access repository traits (ports)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Role;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Role>, DomainError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, DomainError>;
    async fn list_all(&self) -> Result<Vec<Role>, DomainError>;
    async fn create(&self, role: &Role) -> Result<Role, DomainError>;
    async fn update(&self, role: &Role) -> Result<Role, DomainError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleAccessRepository: Send + Sync {
    async fn list_object_ids(&self, role_id: &Uuid) -> Result<Vec<Uuid>, DomainError>;
    /// Full replacement of a role's grant rows in one transaction. No
    /// optimistic locking exists here: concurrent saves race and the last
    /// write wins.
    async fn replace_for_role(
        &self,
        role_id: &Uuid,
        object_ids: &[Uuid],
        saved_by: Option<Uuid>,
    ) -> Result<(), DomainError>;
}
