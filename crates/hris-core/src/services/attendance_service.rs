// ============================================================================
// HRIS Core - Attendance Service
// File: crates/hris-core/src/services/attendance_service.rs
// ============================================================================
//! Clock-in/clock-out with configurable time windows. Windows live in the
//! `attendance` reference group as HH:MM values and are interpreted against
//! the server clock; missing or malformed entries fall back to the built-in
//! defaults.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use hris_shared::constants::{
    DEFAULT_CLOCK_IN_END, DEFAULT_CLOCK_IN_START, DEFAULT_CLOCK_OUT_START, DEFAULT_WORK_START,
    REF_GROUP_ATTENDANCE, REF_KEY_CLOCK_IN_END, REF_KEY_CLOCK_IN_START, REF_KEY_CLOCK_OUT_START,
    REF_KEY_WORK_START,
};
use hris_shared::utils::parse_hhmm;

use crate::domain::AttendanceRecord;
use crate::error::DomainError;
use crate::repositories::{AttendanceRepository, EmployeeRepository, ReferenceRepository};

pub struct AttendanceService {
    attendance: Arc<dyn AttendanceRepository>,
    employees: Arc<dyn EmployeeRepository>,
    references: Arc<dyn ReferenceRepository>,
}

impl AttendanceService {
    pub fn new(
        attendance: Arc<dyn AttendanceRepository>,
        employees: Arc<dyn EmployeeRepository>,
        references: Arc<dyn ReferenceRepository>,
    ) -> Self {
        Self {
            attendance,
            employees,
            references,
        }
    }

    pub async fn clock_in(
        &self,
        employee_id: &Uuid,
        at: DateTime<Utc>,
        note: Option<String>,
    ) -> Result<AttendanceRecord, DomainError> {
        self.check_employee(employee_id).await?;

        let work_date = at.date_naive();
        if self
            .attendance
            .find_for_day(employee_id, work_date)
            .await?
            .is_some()
        {
            return Err(DomainError::AlreadyClockedIn(work_date));
        }

        let time = at.time();
        let window_start = self.window(REF_KEY_CLOCK_IN_START, DEFAULT_CLOCK_IN_START).await;
        let window_end = self.window(REF_KEY_CLOCK_IN_END, DEFAULT_CLOCK_IN_END).await;
        if time < window_start || time > window_end {
            return Err(DomainError::OutsideClockInWindow(time));
        }

        let work_start = self.window(REF_KEY_WORK_START, DEFAULT_WORK_START).await;
        let is_late = time > work_start;

        let record = AttendanceRecord::new(*employee_id, work_date, at, is_late, note)
            .map_err(|e| DomainError::ValidationError(e.to_string()))?;
        let created = self.attendance.create(&record).await?;

        info!(employee_id = %employee_id, %work_date, is_late, "Clock-in recorded");
        Ok(created)
    }

    pub async fn clock_out(
        &self,
        employee_id: &Uuid,
        at: DateTime<Utc>,
    ) -> Result<AttendanceRecord, DomainError> {
        self.check_employee(employee_id).await?;

        let work_date = at.date_naive();
        let mut record = self
            .attendance
            .find_for_day(employee_id, work_date)
            .await?
            .ok_or(DomainError::NotClockedIn(work_date))?;

        let earliest = self
            .window(REF_KEY_CLOCK_OUT_START, DEFAULT_CLOCK_OUT_START)
            .await;
        if at.time() < earliest {
            return Err(DomainError::TooEarlyToClockOut(earliest));
        }

        record.clock_out(at)?;
        let updated = self.attendance.update(&record).await?;

        info!(employee_id = %employee_id, %work_date, "Clock-out recorded");
        Ok(updated)
    }

    pub async fn list_for_range(
        &self,
        employee_id: &Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, DomainError> {
        self.attendance.list_for_range(employee_id, from, to).await
    }

    async fn check_employee(&self, employee_id: &Uuid) -> Result<(), DomainError> {
        let employee = self
            .employees
            .find_by_id(employee_id)
            .await?
            .ok_or(DomainError::EmployeeNotFound)?;
        if !employee.is_working() {
            return Err(DomainError::EmployeeNotFound);
        }
        Ok(())
    }

    async fn window(&self, key: &str, default: &str) -> NaiveTime {
        let configured = self
            .references
            .find_by_key(REF_GROUP_ATTENDANCE, key)
            .await
            .ok()
            .flatten()
            .filter(|item| item.is_active);

        if let Some(item) = configured {
            if let Some(time) = parse_hhmm(&item.value) {
                return time;
            }
            warn!(key, value = %item.value, "Malformed attendance window value, using default");
        }

        parse_hhmm(default).unwrap_or_else(|| NaiveTime::from_hms_opt(0, 0, 0).unwrap())
    }
}
