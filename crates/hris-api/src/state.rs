//! Shared application state

use std::sync::Arc;

use hris_core::services::{
    AccessService, AttendanceService, EmployeeService, LeaveService, MasterDataService,
    ObjectService, RoleService, UserService,
};
use hris_shared::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub objects: Arc<ObjectService>,
    pub access: Arc<AccessService>,
    pub roles: Arc<RoleService>,
    pub employees: Arc<EmployeeService>,
    pub master: Arc<MasterDataService>,
    pub users: Arc<UserService>,
    pub leaves: Arc<LeaveService>,
    pub attendance: Arc<AttendanceService>,
}
