//! Employee repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use hris_shared::types::Pagination;

use crate::domain::Employee;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Employee>, DomainError>;
    async fn find_by_number(&self, employee_number: &str) -> Result<Option<Employee>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, DomainError>;
    /// One page of non-removed employees ordered by employee number.
    async fn list_all(&self, page: &Pagination) -> Result<Vec<Employee>, DomainError>;
    async fn list_by_division(&self, division_id: &Uuid) -> Result<Vec<Employee>, DomainError>;
    async fn create(&self, employee: &Employee) -> Result<Employee, DomainError>;
    async fn update(&self, employee: &Employee) -> Result<Employee, DomainError>;
}
