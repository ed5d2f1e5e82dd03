//! Domain error to HTTP status mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use hris_core::DomainError;

use crate::response::ApiResponse;

/// Handler-edge wrapper so domain errors can be propagated with `?` and
/// rendered through the standard response envelope.
pub struct ApiFailure(pub DomainError);

impl From<DomainError> for ApiFailure {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

fn classify(err: &DomainError) -> (StatusCode, &'static str) {
    use DomainError::*;

    match err {
        ObjectNotFound => (StatusCode::NOT_FOUND, "OBJECT_NOT_FOUND"),
        ParentNotFound => (StatusCode::NOT_FOUND, "PARENT_NOT_FOUND"),
        RoleNotFound => (StatusCode::NOT_FOUND, "ROLE_NOT_FOUND"),
        EmployeeNotFound => (StatusCode::NOT_FOUND, "EMPLOYEE_NOT_FOUND"),
        DivisionNotFound => (StatusCode::NOT_FOUND, "DIVISION_NOT_FOUND"),
        PositionNotFound => (StatusCode::NOT_FOUND, "POSITION_NOT_FOUND"),
        UserNotFound => (StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
        ReferenceNotFound => (StatusCode::NOT_FOUND, "REFERENCE_NOT_FOUND"),
        LeaveNotFound => (StatusCode::NOT_FOUND, "LEAVE_NOT_FOUND"),
        AttendanceNotFound => (StatusCode::NOT_FOUND, "ATTENDANCE_NOT_FOUND"),

        AccessNameAlreadyExists(_) => (StatusCode::CONFLICT, "ACCESS_NAME_EXISTS"),
        RoleNameAlreadyExists(_) => (StatusCode::CONFLICT, "ROLE_NAME_EXISTS"),
        EmployeeNumberAlreadyExists(_) => (StatusCode::CONFLICT, "EMPLOYEE_NUMBER_EXISTS"),
        EmailAlreadyExists(_) => (StatusCode::CONFLICT, "EMAIL_EXISTS"),
        DivisionNameAlreadyExists(_) => (StatusCode::CONFLICT, "DIVISION_NAME_EXISTS"),
        PositionNameAlreadyExists(_) => (StatusCode::CONFLICT, "POSITION_NAME_EXISTS"),
        UsernameAlreadyExists(_) => (StatusCode::CONFLICT, "USERNAME_EXISTS"),
        ReferenceKeyAlreadyExists { .. } => (StatusCode::CONFLICT, "REFERENCE_KEY_EXISTS"),
        UnableToGenerateUniqueName => (StatusCode::CONFLICT, "UNIQUE_NAME_EXHAUSTED"),
        HasActiveChildren => (StatusCode::CONFLICT, "HAS_ACTIVE_CHILDREN"),
        RoleInUse => (StatusCode::CONFLICT, "ROLE_IN_USE"),
        LeaveOverlap => (StatusCode::CONFLICT, "LEAVE_OVERLAP"),
        LeaveNotPending => (StatusCode::CONFLICT, "LEAVE_NOT_PENDING"),
        AlreadyClockedIn(_) => (StatusCode::CONFLICT, "ALREADY_CLOCKED_IN"),
        NotClockedIn(_) => (StatusCode::CONFLICT, "NOT_CLOCKED_IN"),

        ParentNotMenu => (StatusCode::UNPROCESSABLE_ENTITY, "PARENT_NOT_MENU"),
        CycleDetected(_) => (StatusCode::UNPROCESSABLE_ENTITY, "CYCLE_DETECTED"),
        InvalidLeaveRange => (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_LEAVE_RANGE"),
        OutsideClockInWindow(_) => {
            (StatusCode::UNPROCESSABLE_ENTITY, "OUTSIDE_CLOCK_IN_WINDOW")
        }
        TooEarlyToClockOut(_) => (StatusCode::UNPROCESSABLE_ENTITY, "TOO_EARLY_TO_CLOCK_OUT"),
        ValidationError(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),

        DatabaseError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
        InternalError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let (status, code) = classify(&self.0);

        // 5xx details stay in the logs, not in the response body.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Request failed: {}", self.0);
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };

        (status, Json(ApiResponse::<()>::error(code, &message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_not_found_maps_to_404() {
        let (status, code) = classify(&DomainError::ObjectNotFound);
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "OBJECT_NOT_FOUND");
    }

    #[test]
    fn test_conflicts_map_to_409() {
        let (status, _) = classify(&DomainError::HasActiveChildren);
        assert_eq!(status, StatusCode::CONFLICT);
        let (status, _) = classify(&DomainError::LeaveOverlap);
        assert_eq!(status, StatusCode::CONFLICT);
        let (status, _) =
            classify(&DomainError::AccessNameAlreadyExists("employees".to_string()));
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[test]
    fn test_cycle_maps_to_422() {
        let (status, code) = classify(&DomainError::CycleDetected(Uuid::new_v4()));
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(code, "CYCLE_DETECTED");
    }

    #[test]
    fn test_database_error_maps_to_500() {
        let (status, _) = classify(&DomainError::DatabaseError("boom".to_string()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
