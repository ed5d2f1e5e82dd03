//! Domain services (business logic)

pub mod access_service;
pub mod attendance_service;
pub mod employee_service;
pub mod leave_service;
pub mod master_service;
pub mod object_service;
pub mod role_service;
pub mod user_service;

pub use access_service::{AccessCache, AccessService};
pub use attendance_service::AttendanceService;
pub use employee_service::{CreateEmployeeInput, EmployeeService, UpdateEmployeeInput};
pub use leave_service::{LeaveService, SubmitLeaveInput};
pub use master_service::{DivisionInput, MasterDataService, PositionInput, ReferenceInput};
pub use object_service::{
    CreateObjectInput, MoveObjectInput, ObjectService, UpdateObjectInput,
};
pub use role_service::{RoleInput, RoleService};
pub use user_service::{CreateUserInput, UpdateUserInput, UserService};
