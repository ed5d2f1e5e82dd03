//! PostgreSQL repository implementations

pub mod attendance_repo_impl;
pub mod employee_repo_impl;
pub mod leave_repo_impl;
pub mod object_repo_impl;
pub mod org_repo_impl;
pub mod reference_repo_impl;
pub mod role_repo_impl;
pub mod user_repo_impl;

pub use attendance_repo_impl::PgAttendanceRepository;
pub use employee_repo_impl::PgEmployeeRepository;
pub use leave_repo_impl::PgLeaveRepository;
pub use object_repo_impl::PgObjectRepository;
pub use org_repo_impl::{PgDivisionRepository, PgPositionRepository};
pub use reference_repo_impl::PgReferenceRepository;
pub use role_repo_impl::{PgRoleAccessRepository, PgRoleRepository};
pub use user_repo_impl::PgAppUserRepository;
