// ============================================================================
// HRIS Core - Leave Request Entity
// File: crates/hris-core/src/domain/leave_request.rs
// Description: On-leave request with an approval status machine
// ============================================================================

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::DomainError;

/// Leave type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    Annual,
    Sick,
    Unpaid,
    Special,
}

impl LeaveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveType::Annual => "annual",
            LeaveType::Sick => "sick",
            LeaveType::Unpaid => "unpaid",
            LeaveType::Special => "special",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "annual" => Some(LeaveType::Annual),
            "sick" => Some(LeaveType::Sick),
            "unpaid" => Some(LeaveType::Unpaid),
            "special" => Some(LeaveType::Special),
            _ => None,
        }
    }
}

/// Leave status enumeration. Only `Submitted` requests may transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    Submitted,
    Approved,
    Rejected,
    Cancelled,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Submitted => "submitted",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
            LeaveStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "submitted" => Some(LeaveStatus::Submitted),
            "approved" => Some(LeaveStatus::Approved),
            "rejected" => Some(LeaveStatus::Rejected),
            "cancelled" => Some(LeaveStatus::Cancelled),
            _ => None,
        }
    }
}

/// Leave Request entity
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LeaveRequest {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    #[validate(length(min = 5, max = 1000, message = "Reason must be between 5 and 1000 characters"))]
    pub reason: String,

    pub status: LeaveStatus,
    pub decided_by: Option<Uuid>,
    pub decided_at: Option<DateTime<Utc>>,

    #[validate(length(max = 1000, message = "Decision note too long"))]
    pub decision_note: Option<String>,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub modified_at: Option<DateTime<Utc>>,
    pub modified_by: Option<Uuid>,
}

impl LeaveRequest {
    pub fn new(
        employee_id: Uuid,
        leave_type: LeaveType,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: String,
        created_by: Option<Uuid>,
    ) -> Result<Self, validator::ValidationErrors> {
        let request = Self {
            id: Uuid::new_v4(),
            employee_id,
            leave_type,
            start_date,
            end_date,
            reason: reason.trim().to_string(),
            status: LeaveStatus::Submitted,
            decided_by: None,
            decided_at: None,
            decision_note: None,
            created_at: Utc::now(),
            created_by,
            modified_at: None,
            modified_by: None,
        };

        request.validate()?;
        Ok(request)
    }

    /// Calendar days covered, inclusive of both ends.
    pub fn day_count(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    pub fn is_pending(&self) -> bool {
        self.status == LeaveStatus::Submitted
    }

    pub fn approve(&mut self, decided_by: Uuid, note: Option<String>) -> Result<(), DomainError> {
        self.decide(LeaveStatus::Approved, decided_by, note)
    }

    pub fn reject(&mut self, decided_by: Uuid, note: Option<String>) -> Result<(), DomainError> {
        self.decide(LeaveStatus::Rejected, decided_by, note)
    }

    /// Withdrawal by the requester, allowed while still pending.
    pub fn cancel(&mut self, cancelled_by: Uuid) -> Result<(), DomainError> {
        if !self.is_pending() {
            return Err(DomainError::LeaveNotPending);
        }
        self.status = LeaveStatus::Cancelled;
        self.modified_at = Some(Utc::now());
        self.modified_by = Some(cancelled_by);
        Ok(())
    }

    fn decide(
        &mut self,
        status: LeaveStatus,
        decided_by: Uuid,
        note: Option<String>,
    ) -> Result<(), DomainError> {
        if !self.is_pending() {
            return Err(DomainError::LeaveNotPending);
        }
        self.status = status;
        self.decided_by = Some(decided_by);
        self.decided_at = Some(Utc::now());
        self.decision_note = note.map(|n| n.trim().to_string());
        self.modified_at = Some(Utc::now());
        self.modified_by = Some(decided_by);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_request() -> LeaveRequest {
        LeaveRequest::new(
            Uuid::new_v4(),
            LeaveType::Annual,
            NaiveDate::from_ymd_opt(2025, 8, 11).unwrap(),
            NaiveDate::from_ymd_opt(2025, 8, 13).unwrap(),
            "Family matters".to_string(),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_day_count_inclusive() {
        let request = pending_request();
        assert_eq!(request.day_count(), 3);
    }

    #[test]
    fn test_approve_pending() {
        let mut request = pending_request();
        let approver = Uuid::new_v4();
        request.approve(approver, Some("ok".to_string())).unwrap();
        assert_eq!(request.status, LeaveStatus::Approved);
        assert_eq!(request.decided_by, Some(approver));
        assert!(request.decided_at.is_some());
    }

    #[test]
    fn test_double_decision_rejected() {
        let mut request = pending_request();
        request.approve(Uuid::new_v4(), None).unwrap();
        let result = request.reject(Uuid::new_v4(), None);
        assert!(matches!(result, Err(DomainError::LeaveNotPending)));
    }

    #[test]
    fn test_cancel_only_while_pending() {
        let mut request = pending_request();
        request.cancel(Uuid::new_v4()).unwrap();
        assert_eq!(request.status, LeaveStatus::Cancelled);
        assert!(request.cancel(Uuid::new_v4()).is_err());
    }
}
