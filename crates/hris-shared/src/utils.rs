//! Utility functions

use chrono::NaiveTime;

/// Parse an `HH:MM` clock value as stored in reference configuration.
pub fn parse_hhmm(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").ok()
}

/// Normalize a client route path: trimmed, single leading slash, no trailing slash.
pub fn normalize_route(route: &str) -> String {
    let trimmed = route.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hhmm() {
        assert_eq!(
            parse_hhmm("08:30"),
            NaiveTime::from_hms_opt(8, 30, 0)
        );
        assert_eq!(parse_hhmm(" 16:00 "), NaiveTime::from_hms_opt(16, 0, 0));
        assert!(parse_hhmm("25:00").is_none());
        assert!(parse_hhmm("not a time").is_none());
    }

    #[test]
    fn test_normalize_route() {
        assert_eq!(normalize_route("dashboard"), "/dashboard");
        assert_eq!(normalize_route("/employees/"), "/employees");
        assert_eq!(normalize_route("  /leave  "), "/leave");
        assert_eq!(normalize_route(""), "/");
    }
}
