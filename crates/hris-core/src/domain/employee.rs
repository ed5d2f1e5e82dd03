// ============================================================================
// HRIS Core - Employee Entity
// File: crates/hris-core/src/domain/employee.rs
// Description: Employee master data
// ============================================================================

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Employment status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    Active,
    OnLeave,
    Resigned,
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "active",
            EmployeeStatus::OnLeave => "on_leave",
            EmployeeStatus::Resigned => "resigned",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(EmployeeStatus::Active),
            "on_leave" => Some(EmployeeStatus::OnLeave),
            "resigned" => Some(EmployeeStatus::Resigned),
            _ => None,
        }
    }
}

impl Default for EmployeeStatus {
    fn default() -> Self {
        EmployeeStatus::Active
    }
}

/// Employee entity
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Employee {
    pub id: Uuid,

    #[validate(length(min = 3, max = 30, message = "Employee number must be between 3 and 30 characters"))]
    pub employee_number: String,

    #[validate(length(min = 2, max = 150, message = "Full name must be between 2 and 150 characters"))]
    pub full_name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(max = 30, message = "Phone number too long"))]
    pub phone: Option<String>,

    pub division_id: Uuid,
    pub position_id: Uuid,
    pub join_date: NaiveDate,
    pub status: EmployeeStatus,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub modified_at: Option<DateTime<Utc>>,
    pub modified_by: Option<Uuid>,
    pub removed_at: Option<DateTime<Utc>>,
    pub removed_by: Option<Uuid>,
}

impl Employee {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        employee_number: String,
        full_name: String,
        email: String,
        phone: Option<String>,
        division_id: Uuid,
        position_id: Uuid,
        join_date: NaiveDate,
        created_by: Option<Uuid>,
    ) -> Result<Self, validator::ValidationErrors> {
        let employee = Self {
            id: Uuid::new_v4(),
            employee_number: employee_number.trim().to_string(),
            full_name: full_name.trim().to_string(),
            email: email.trim().to_lowercase(),
            phone: phone.map(|p| p.trim().to_string()),
            division_id,
            position_id,
            join_date,
            status: EmployeeStatus::Active,
            created_at: Utc::now(),
            created_by,
            modified_at: None,
            modified_by: None,
            removed_at: None,
            removed_by: None,
        };

        employee.validate()?;
        Ok(employee)
    }

    pub fn is_working(&self) -> bool {
        self.status == EmployeeStatus::Active && self.removed_at.is_none()
    }

    pub fn soft_delete(&mut self, deleted_by: Option<Uuid>) {
        self.removed_at = Some(Utc::now());
        self.removed_by = deleted_by;
        self.status = EmployeeStatus::Resigned;
    }

    pub fn is_deleted(&self) -> bool {
        self.removed_at.is_some()
    }
}
