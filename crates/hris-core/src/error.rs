//! Domain errors

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Object not found")]
    ObjectNotFound,

    #[error("Parent object not found")]
    ParentNotFound,

    #[error("Parent of an action must be an active menu object")]
    ParentNotMenu,

    #[error("Object still has active children")]
    HasActiveChildren,

    #[error("Assigning parent {0} would make the object its own ancestor")]
    CycleDetected(Uuid),

    #[error("Access name already exists: {0}")]
    AccessNameAlreadyExists(String),

    #[error("Unable to generate unique name")]
    UnableToGenerateUniqueName,

    #[error("Role not found")]
    RoleNotFound,

    #[error("Role name already exists: {0}")]
    RoleNameAlreadyExists(String),

    #[error("Role is still assigned to users")]
    RoleInUse,

    #[error("Employee not found")]
    EmployeeNotFound,

    #[error("Employee number already exists: {0}")]
    EmployeeNumberAlreadyExists(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Division not found")]
    DivisionNotFound,

    #[error("Division name already exists: {0}")]
    DivisionNameAlreadyExists(String),

    #[error("Position not found")]
    PositionNotFound,

    #[error("Position name already exists: {0}")]
    PositionNameAlreadyExists(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("Reference item not found")]
    ReferenceNotFound,

    #[error("Reference key already exists in group {group_key}: {item_key}")]
    ReferenceKeyAlreadyExists { group_key: String, item_key: String },

    #[error("Leave request not found")]
    LeaveNotFound,

    #[error("Leave start date must not be after end date")]
    InvalidLeaveRange,

    #[error("Leave request overlaps an existing request")]
    LeaveOverlap,

    #[error("Leave request is not awaiting a decision")]
    LeaveNotPending,

    #[error("Attendance record not found")]
    AttendanceNotFound,

    #[error("Already clocked in on {0}")]
    AlreadyClockedIn(NaiveDate),

    #[error("No open attendance record on {0}")]
    NotClockedIn(NaiveDate),

    #[error("Clock-in is not allowed at {0}")]
    OutsideClockInWindow(NaiveTime),

    #[error("Clock-out is not allowed before {0}")]
    TooEarlyToClockOut(NaiveTime),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}
