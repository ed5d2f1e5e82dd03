//! App user repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::AppUser;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppUserRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<AppUser>, DomainError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<AppUser>, DomainError>;
    async fn list_all(&self) -> Result<Vec<AppUser>, DomainError>;
    async fn count_by_role(&self, role_id: &Uuid) -> Result<i64, DomainError>;
    async fn create(&self, user: &AppUser) -> Result<AppUser, DomainError>;
    async fn update(&self, user: &AppUser) -> Result<AppUser, DomainError>;
}
