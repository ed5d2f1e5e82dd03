//! Division and position repository traits (ports)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Division, Position};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DivisionRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Division>, DomainError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Division>, DomainError>;
    async fn list_all(&self) -> Result<Vec<Division>, DomainError>;
    async fn create(&self, division: &Division) -> Result<Division, DomainError>;
    async fn update(&self, division: &Division) -> Result<Division, DomainError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PositionRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Position>, DomainError>;
    async fn find_by_name(&self, division_id: &Uuid, name: &str) -> Result<Option<Position>, DomainError>;
    async fn list_all(&self) -> Result<Vec<Position>, DomainError>;
    async fn list_by_division(&self, division_id: &Uuid) -> Result<Vec<Position>, DomainError>;
    async fn create(&self, position: &Position) -> Result<Position, DomainError>;
    async fn update(&self, position: &Position) -> Result<Position, DomainError>;
}
