//! Attendance repository trait (port)

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::AttendanceRecord;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    async fn find_for_day(
        &self,
        employee_id: &Uuid,
        work_date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, DomainError>;
    async fn list_for_range(
        &self,
        employee_id: &Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, DomainError>;
    async fn create(&self, record: &AttendanceRecord) -> Result<AttendanceRecord, DomainError>;
    async fn update(&self, record: &AttendanceRecord) -> Result<AttendanceRecord, DomainError>;
}
