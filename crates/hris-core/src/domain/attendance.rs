// ============================================================================
// HRIS Core - Attendance Entity
// File: crates/hris-core/src/domain/attendance.rs
// Description: Daily clock-in/clock-out record
// ============================================================================

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::DomainError;

/// Attendance record: at most one per employee per work date.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub work_date: NaiveDate,
    pub clock_in_at: DateTime<Utc>,
    pub clock_out_at: Option<DateTime<Utc>>,

    /// Set when the clock-in landed after the configured work start.
    pub is_late: bool,

    #[validate(length(max = 500, message = "Note too long"))]
    pub note: Option<String>,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl AttendanceRecord {
    pub fn new(
        employee_id: Uuid,
        work_date: NaiveDate,
        clock_in_at: DateTime<Utc>,
        is_late: bool,
        note: Option<String>,
    ) -> Result<Self, validator::ValidationErrors> {
        let record = Self {
            id: Uuid::new_v4(),
            employee_id,
            work_date,
            clock_in_at,
            clock_out_at: None,
            is_late,
            note: note.map(|n| n.trim().to_string()),
            created_at: Utc::now(),
            modified_at: None,
        };

        record.validate()?;
        Ok(record)
    }

    pub fn is_open(&self) -> bool {
        self.clock_out_at.is_none()
    }

    pub fn clock_out(&mut self, at: DateTime<Utc>) -> Result<(), DomainError> {
        if !self.is_open() {
            return Err(DomainError::NotClockedIn(self.work_date));
        }
        self.clock_out_at = Some(at);
        self.modified_at = Some(Utc::now());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_out_once() {
        let mut record = AttendanceRecord::new(
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2025, 8, 4).unwrap(),
            Utc::now(),
            false,
            None,
        )
        .unwrap();
        assert!(record.is_open());

        record.clock_out(Utc::now()).unwrap();
        assert!(!record.is_open());
        assert!(record.clock_out(Utc::now()).is_err());
    }
}
