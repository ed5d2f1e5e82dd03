//! HTTP handlers

pub mod attendance;
pub mod employees;
pub mod health;
pub mod leaves;
pub mod objects;
pub mod org;
pub mod references;
pub mod roles;
pub mod users;

use axum::http::HeaderMap;
use uuid::Uuid;

/// Actor id forwarded by the gateway once a session layer fronts this API.
/// Absent or malformed headers leave the audit columns empty.
pub(crate) fn actor_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_actor_id_parses_header() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert("x-user-id", HeaderValue::from_str(&id.to_string()).unwrap());
        assert_eq!(actor_id(&headers), Some(id));
    }

    #[test]
    fn test_actor_id_ignores_garbage() {
        let mut headers = HeaderMap::new();
        headers.insert("x-user-id", HeaderValue::from_static("not-a-uuid"));
        assert_eq!(actor_id(&headers), None);
        assert_eq!(actor_id(&HeaderMap::new()), None);
    }
}
