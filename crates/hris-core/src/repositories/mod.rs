//! Repository traits (ports)

pub mod attendance_repository;
pub mod employee_repository;
pub mod leave_repository;
pub mod object_repository;
pub mod org_repository;
pub mod reference_repository;
pub mod role_repository;
pub mod user_repository;

pub use attendance_repository::AttendanceRepository;
pub use employee_repository::EmployeeRepository;
pub use leave_repository::LeaveRepository;
pub use object_repository::ObjectRepository;
pub use org_repository::{DivisionRepository, PositionRepository};
pub use reference_repository::ReferenceRepository;
pub use role_repository::{RoleAccessRepository, RoleRepository};
pub use user_repository::AppUserRepository;

#[cfg(test)]
pub use attendance_repository::MockAttendanceRepository;
#[cfg(test)]
pub use employee_repository::MockEmployeeRepository;
#[cfg(test)]
pub use leave_repository::MockLeaveRepository;
#[cfg(test)]
pub use object_repository::MockObjectRepository;
#[cfg(test)]
pub use org_repository::{MockDivisionRepository, MockPositionRepository};
#[cfg(test)]
pub use reference_repository::MockReferenceRepository;
#[cfg(test)]
pub use role_repository::{MockRoleAccessRepository, MockRoleRepository};
#[cfg(test)]
pub use user_repository::MockAppUserRepository;
