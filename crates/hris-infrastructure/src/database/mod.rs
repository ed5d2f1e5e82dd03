//! Database module (PostgreSQL adapters)

pub mod connection;
pub mod postgres;

pub use connection::create_pool;
pub use postgres::{
    PgAppUserRepository, PgAttendanceRepository, PgDivisionRepository, PgEmployeeRepository,
    PgLeaveRepository, PgObjectRepository, PgPositionRepository, PgReferenceRepository,
    PgRoleAccessRepository, PgRoleRepository,
};
