use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{error, info};

use hris_api::handlers::{
    attendance, employees, health, leaves, objects, org, references, roles, users,
};
use hris_api::state::AppState;
use hris_core::repositories::{
    AppUserRepository, AttendanceRepository, DivisionRepository, EmployeeRepository,
    LeaveRepository, ObjectRepository, PositionRepository, ReferenceRepository,
    RoleAccessRepository, RoleRepository,
};
use hris_core::services::{
    AccessCache, AccessService, AttendanceService, EmployeeService, LeaveService,
    MasterDataService, ObjectService, RoleService, UserService,
};
use hris_infrastructure::{
    create_pool, PgAppUserRepository, PgAttendanceRepository, PgDivisionRepository,
    PgEmployeeRepository, PgLeaveRepository, PgObjectRepository, PgPositionRepository,
    PgReferenceRepository, PgRoleAccessRepository, PgRoleRepository,
};
use hris_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    hris_shared::telemetry::init_telemetry();

    info!("HRIS Server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Connect to Database
    let pool = create_pool(&config.database.url, config.database.max_connections).await?;
    info!("Database connection established.");

    // Repositories (adapters behind the core's ports)
    let object_repo: Arc<dyn ObjectRepository> = Arc::new(PgObjectRepository::new(pool.clone()));
    let role_repo: Arc<dyn RoleRepository> = Arc::new(PgRoleRepository::new(pool.clone()));
    let grant_repo: Arc<dyn RoleAccessRepository> =
        Arc::new(PgRoleAccessRepository::new(pool.clone()));
    let division_repo: Arc<dyn DivisionRepository> =
        Arc::new(PgDivisionRepository::new(pool.clone()));
    let position_repo: Arc<dyn PositionRepository> =
        Arc::new(PgPositionRepository::new(pool.clone()));
    let employee_repo: Arc<dyn EmployeeRepository> =
        Arc::new(PgEmployeeRepository::new(pool.clone()));
    let user_repo: Arc<dyn AppUserRepository> = Arc::new(PgAppUserRepository::new(pool.clone()));
    let reference_repo: Arc<dyn ReferenceRepository> =
        Arc::new(PgReferenceRepository::new(pool.clone()));
    let leave_repo: Arc<dyn LeaveRepository> = Arc::new(PgLeaveRepository::new(pool.clone()));
    let attendance_repo: Arc<dyn AttendanceRepository> =
        Arc::new(PgAttendanceRepository::new(pool.clone()));

    // Services
    let access_cache = Arc::new(AccessCache::new(Duration::from_secs(
        config.access_cache.ttl_minutes * 60,
    )));
    let state = AppState {
        config: config.clone(),
        objects: Arc::new(ObjectService::new(
            Arc::clone(&object_repo),
            Arc::clone(&access_cache),
        )),
        access: Arc::new(AccessService::new(
            Arc::clone(&object_repo),
            Arc::clone(&role_repo),
            Arc::clone(&grant_repo),
            Arc::clone(&access_cache),
        )),
        roles: Arc::new(RoleService::new(
            Arc::clone(&role_repo),
            Arc::clone(&user_repo),
        )),
        employees: Arc::new(EmployeeService::new(
            Arc::clone(&employee_repo),
            Arc::clone(&division_repo),
            Arc::clone(&position_repo),
        )),
        master: Arc::new(MasterDataService::new(
            Arc::clone(&division_repo),
            Arc::clone(&position_repo),
            Arc::clone(&reference_repo),
        )),
        users: Arc::new(UserService::new(
            Arc::clone(&user_repo),
            Arc::clone(&role_repo),
            Arc::clone(&employee_repo),
        )),
        leaves: Arc::new(LeaveService::new(
            Arc::clone(&leave_repo),
            Arc::clone(&employee_repo),
        )),
        attendance: Arc::new(AttendanceService::new(
            Arc::clone(&attendance_repo),
            Arc::clone(&employee_repo),
            Arc::clone(&reference_repo),
        )),
    };

    // Build router
    let app = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Objects
        .route(
            "/api/v1/objects",
            get(objects::list).post(objects::create),
        )
        .route("/api/v1/objects/tree", get(objects::tree))
        .route(
            "/api/v1/objects/{id}",
            get(objects::get).put(objects::update).delete(objects::delete),
        )
        .route("/api/v1/objects/{id}/move", post(objects::move_object))
        .route("/api/v1/objects/{id}/copy", post(objects::copy))
        // Roles and access
        .route("/api/v1/roles", get(roles::list).post(roles::create))
        .route(
            "/api/v1/roles/{id}",
            get(roles::get).put(roles::update).delete(roles::delete),
        )
        .route(
            "/api/v1/roles/{id}/access",
            get(roles::access_get).put(roles::access_put),
        )
        .route("/api/v1/roles/{id}/navigation", get(roles::navigation))
        // Employees
        .route(
            "/api/v1/employees",
            get(employees::list).post(employees::create),
        )
        .route(
            "/api/v1/employees/{id}",
            get(employees::get)
                .put(employees::update)
                .delete(employees::delete),
        )
        // Divisions
        .route(
            "/api/v1/divisions",
            get(org::list_divisions).post(org::create_division),
        )
        .route(
            "/api/v1/divisions/{id}",
            get(org::get_division)
                .put(org::update_division)
                .delete(org::delete_division),
        )
        // Positions
        .route(
            "/api/v1/positions",
            get(org::list_positions).post(org::create_position),
        )
        .route(
            "/api/v1/positions/{id}",
            get(org::get_position)
                .put(org::update_position)
                .delete(org::delete_position),
        )
        // Users
        .route("/api/v1/users", get(users::list).post(users::create))
        .route(
            "/api/v1/users/{id}",
            get(users::get).put(users::update).delete(users::delete),
        )
        // Reference configuration
        .route("/api/v1/references", post(references::create))
        .route(
            "/api/v1/references/{key}",
            get(references::list_group)
                .put(references::update)
                .delete(references::delete),
        )
        // Leaves
        .route("/api/v1/leaves", get(leaves::list).post(leaves::submit))
        .route("/api/v1/leaves/{id}", get(leaves::get))
        .route("/api/v1/leaves/{id}/approve", post(leaves::approve))
        .route("/api/v1/leaves/{id}/reject", post(leaves::reject))
        .route("/api/v1/leaves/{id}/cancel", post(leaves::cancel))
        // Attendance
        .route("/api/v1/attendance", get(attendance::list))
        .route("/api/v1/attendance/clock-in", post(attendance::clock_in))
        .route("/api/v1/attendance/clock-out", post(attendance::clock_out))
        // Add State
        .with_state(state)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin("http://localhost:5173".parse::<axum::http::HeaderValue>().unwrap())
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::PUT,
                    axum::http::Method::DELETE,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::AUTHORIZATION]),
        );

    // Bind address
    let addr = config.bind_addr()?;
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
