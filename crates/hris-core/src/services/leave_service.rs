// ============================================================================
// HRIS Core - Leave Service
// File: crates/hris-core/src/services/leave_service.rs
// ============================================================================
//! Leave request submission and approval flow.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{LeaveRequest, LeaveStatus, LeaveType};
use crate::error::DomainError;
use crate::repositories::{EmployeeRepository, LeaveRepository};

#[derive(Debug, Deserialize)]
pub struct SubmitLeaveInput {
    pub employee_id: Uuid,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
}

pub struct LeaveService {
    leaves: Arc<dyn LeaveRepository>,
    employees: Arc<dyn EmployeeRepository>,
}

impl LeaveService {
    pub fn new(leaves: Arc<dyn LeaveRepository>, employees: Arc<dyn EmployeeRepository>) -> Self {
        Self { leaves, employees }
    }

    pub async fn get(&self, id: &Uuid) -> Result<LeaveRequest, DomainError> {
        self.leaves
            .find_by_id(id)
            .await?
            .ok_or(DomainError::LeaveNotFound)
    }

    pub async fn list_by_employee(
        &self,
        employee_id: &Uuid,
    ) -> Result<Vec<LeaveRequest>, DomainError> {
        self.leaves.list_by_employee(employee_id).await
    }

    pub async fn list_pending(&self) -> Result<Vec<LeaveRequest>, DomainError> {
        self.leaves.list_by_status(LeaveStatus::Submitted).await
    }

    pub async fn submit(
        &self,
        input: SubmitLeaveInput,
        created_by: Option<Uuid>,
    ) -> Result<LeaveRequest, DomainError> {
        let employee = self
            .employees
            .find_by_id(&input.employee_id)
            .await?
            .ok_or(DomainError::EmployeeNotFound)?;
        if !employee.is_working() {
            return Err(DomainError::EmployeeNotFound);
        }

        if input.start_date > input.end_date {
            return Err(DomainError::InvalidLeaveRange);
        }

        let overlapping = self
            .leaves
            .find_overlapping(&input.employee_id, input.start_date, input.end_date)
            .await?;
        if overlapping
            .iter()
            .any(|r| matches!(r.status, LeaveStatus::Submitted | LeaveStatus::Approved))
        {
            warn!(employee_id = %input.employee_id, "Leave submission overlaps an existing request");
            return Err(DomainError::LeaveOverlap);
        }

        let request = LeaveRequest::new(
            input.employee_id,
            input.leave_type,
            input.start_date,
            input.end_date,
            input.reason,
            created_by,
        )
        .map_err(|e| DomainError::ValidationError(e.to_string()))?;

        let created = self.leaves.create(&request).await?;
        info!(leave_id = %created.id, employee_id = %created.employee_id, days = created.day_count(), "Leave request submitted");
        Ok(created)
    }

    pub async fn approve(
        &self,
        id: &Uuid,
        decided_by: Uuid,
        note: Option<String>,
    ) -> Result<LeaveRequest, DomainError> {
        let mut request = self.get(id).await?;
        request.approve(decided_by, note)?;
        let updated = self.leaves.update(&request).await?;
        info!(leave_id = %updated.id, "Leave request approved");
        Ok(updated)
    }

    pub async fn reject(
        &self,
        id: &Uuid,
        decided_by: Uuid,
        note: Option<String>,
    ) -> Result<LeaveRequest, DomainError> {
        let mut request = self.get(id).await?;
        request.reject(decided_by, note)?;
        let updated = self.leaves.update(&request).await?;
        info!(leave_id = %updated.id, "Leave request rejected");
        Ok(updated)
    }

    pub async fn cancel(&self, id: &Uuid, cancelled_by: Uuid) -> Result<LeaveRequest, DomainError> {
        let mut request = self.get(id).await?;
        request.cancel(cancelled_by)?;
        let updated = self.leaves.update(&request).await?;
        info!(leave_id = %updated.id, "Leave request cancelled");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Employee;
    use crate::repositories::{MockEmployeeRepository, MockLeaveRepository};

    fn employee() -> Employee {
        Employee::new(
            "EMP-0001".to_string(),
            "Budi Santoso".to_string(),
            "budi@example.com".to_string(),
            None,
            Uuid::new_v4(),
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2023, 1, 9).unwrap(),
            None,
        )
        .unwrap()
    }

    fn input(employee_id: Uuid, start: (i32, u32, u32), end: (i32, u32, u32)) -> SubmitLeaveInput {
        SubmitLeaveInput {
            employee_id,
            leave_type: LeaveType::Annual,
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
            reason: "Family trip".to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_creates_pending_request() {
        let employee = employee();
        let employee_id = employee.id;

        let mut employees = MockEmployeeRepository::new();
        employees
            .expect_find_by_id()
            .returning(move |_| Ok(Some(employee.clone())));

        let mut leaves = MockLeaveRepository::new();
        leaves
            .expect_find_overlapping()
            .returning(|_, _, _| Ok(vec![]));
        leaves.expect_create().returning(|r| Ok(r.clone()));

        let service = LeaveService::new(Arc::new(leaves), Arc::new(employees));
        let created = service
            .submit(input(employee_id, (2025, 8, 11), (2025, 8, 13)), None)
            .await
            .unwrap();
        assert_eq!(created.status, LeaveStatus::Submitted);
        assert_eq!(created.day_count(), 3);
    }

    #[tokio::test]
    async fn test_submit_rejects_inverted_range() {
        let employee = employee();
        let employee_id = employee.id;

        let mut employees = MockEmployeeRepository::new();
        employees
            .expect_find_by_id()
            .returning(move |_| Ok(Some(employee.clone())));

        let service = LeaveService::new(
            Arc::new(MockLeaveRepository::new()),
            Arc::new(employees),
        );
        let result = service
            .submit(input(employee_id, (2025, 8, 13), (2025, 8, 11)), None)
            .await;
        assert!(matches!(result, Err(DomainError::InvalidLeaveRange)));
    }

    #[tokio::test]
    async fn test_submit_rejects_overlap_with_approved() {
        let employee = employee();
        let employee_id = employee.id;

        let mut employees = MockEmployeeRepository::new();
        employees
            .expect_find_by_id()
            .returning(move |_| Ok(Some(employee.clone())));

        let mut existing = LeaveRequest::new(
            employee_id,
            LeaveType::Sick,
            NaiveDate::from_ymd_opt(2025, 8, 12).unwrap(),
            NaiveDate::from_ymd_opt(2025, 8, 12).unwrap(),
            "Fever since Monday".to_string(),
            None,
        )
        .unwrap();
        existing.approve(Uuid::new_v4(), None).unwrap();

        let mut leaves = MockLeaveRepository::new();
        leaves
            .expect_find_overlapping()
            .returning(move |_, _, _| Ok(vec![existing.clone()]));

        let service = LeaveService::new(Arc::new(leaves), Arc::new(employees));
        let result = service
            .submit(input(employee_id, (2025, 8, 11), (2025, 8, 13)), None)
            .await;
        assert!(matches!(result, Err(DomainError::LeaveOverlap)));
    }

    #[tokio::test]
    async fn test_overlap_with_rejected_request_is_allowed() {
        let employee = employee();
        let employee_id = employee.id;

        let mut employees = MockEmployeeRepository::new();
        employees
            .expect_find_by_id()
            .returning(move |_| Ok(Some(employee.clone())));

        let mut existing = LeaveRequest::new(
            employee_id,
            LeaveType::Annual,
            NaiveDate::from_ymd_opt(2025, 8, 12).unwrap(),
            NaiveDate::from_ymd_opt(2025, 8, 12).unwrap(),
            "Declined earlier".to_string(),
            None,
        )
        .unwrap();
        existing.reject(Uuid::new_v4(), None).unwrap();

        let mut leaves = MockLeaveRepository::new();
        leaves
            .expect_find_overlapping()
            .returning(move |_, _, _| Ok(vec![existing.clone()]));
        leaves.expect_create().returning(|r| Ok(r.clone()));

        let service = LeaveService::new(Arc::new(leaves), Arc::new(employees));
        let result = service
            .submit(input(employee_id, (2025, 8, 11), (2025, 8, 13)), None)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_approve_marks_request_decided() {
        let request = LeaveRequest::new(
            Uuid::new_v4(),
            LeaveType::Annual,
            NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 9, 2).unwrap(),
            "Short break".to_string(),
            None,
        )
        .unwrap();
        let request_id = request.id;

        let mut leaves = MockLeaveRepository::new();
        let stored = std::sync::Mutex::new(request);
        leaves.expect_find_by_id().returning(move |_| {
            Ok(Some(stored.lock().unwrap().clone()))
        });
        leaves.expect_update().returning(|r| Ok(r.clone()));

        let employees = MockEmployeeRepository::new();
        let service = LeaveService::new(Arc::new(leaves), Arc::new(employees));

        let approved = service.approve(&request_id, Uuid::new_v4(), None).await.unwrap();
        assert_eq!(approved.status, LeaveStatus::Approved);
    }
}
