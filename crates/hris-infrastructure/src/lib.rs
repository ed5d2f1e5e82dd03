//! # HRIS Infrastructure
//!
//! Database implementations (adapters).

pub mod database;

pub use database::{
    create_pool, PgAppUserRepository, PgAttendanceRepository, PgDivisionRepository,
    PgEmployeeRepository, PgLeaveRepository, PgObjectRepository, PgPositionRepository,
    PgReferenceRepository, PgRoleAccessRepository, PgRoleRepository,
};
