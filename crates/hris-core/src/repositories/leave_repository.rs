//! Leave request repository trait (port)

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{LeaveRequest, LeaveStatus};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeaveRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<LeaveRequest>, DomainError>;
    async fn list_by_employee(&self, employee_id: &Uuid) -> Result<Vec<LeaveRequest>, DomainError>;
    async fn list_by_status(&self, status: LeaveStatus) -> Result<Vec<LeaveRequest>, DomainError>;
    /// Requests of the employee whose date range intersects `[start, end]`,
    /// regardless of status.
    async fn find_overlapping(
        &self,
        employee_id: &Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<LeaveRequest>, DomainError>;
    async fn create(&self, request: &LeaveRequest) -> Result<LeaveRequest, DomainError>;
    async fn update(&self, request: &LeaveRequest) -> Result<LeaveRequest, DomainError>;
}
