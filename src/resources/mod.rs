//! Per-entity definitions: list endpoints, drafts and extra calls.
//!
//! Each screen pairs a [`Resource`] (what the list fetches and how its total
//! is reported) with a [`crate::controller::Draft`] for its edit dialog.

pub mod applications;
pub mod categories;
pub mod courses;
pub mod dashboard;
pub mod enrollments;
pub mod lessons;
pub mod notifications;
pub mod promo_codes;
pub mod quizzes;
pub mod reports;
pub mod settings;
pub mod users;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;

use admin_wire::TotalShape;

use crate::controller::{ListFilter, PageParam};

/// A server-paginated collection.
pub trait Resource: 'static {
    type Item: DeserializeOwned + Clone + PartialEq + 'static;
    type Filter: ListFilter + Default + Clone + PartialEq + 'static;

    /// Collection path, e.g. `/web/courses`.
    const PATH: &'static str;
    const PAGE_PARAM: PageParam;
    /// Where this endpoint reports its total.
    const TOTAL: TotalShape;
}

/// Trimmed text, or `None` when blank.
pub fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Convert a `date` or `datetime-local` input value into RFC 3339 (UTC).
pub fn input_to_rfc3339(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc).to_rfc3339());
    }
    for format in ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed.and_utc().to_rfc3339());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().to_rfc3339())
}

/// Convert a backend timestamp into a `datetime-local` input value.
pub fn rfc3339_to_input(value: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return parsed.with_timezone(&Utc).format("%Y-%m-%dT%H:%M").to_string();
    }
    // Backend timestamps sometimes come without an offset
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.format("%Y-%m-%dT%H:%M").to_string())
        .unwrap_or_default()
}

/// `YYYY-MM-DD` part of a backend timestamp, for table cells.
pub fn short_date(value: &str) -> String {
    value.get(..10).unwrap_or(value).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank("  "), None);
        assert_eq!(non_blank(" x "), Some("x".into()));
    }

    #[test]
    fn test_input_dates() {
        assert_eq!(
            input_to_rfc3339("2025-03-01T09:30").as_deref(),
            Some("2025-03-01T09:30:00+00:00")
        );
        assert_eq!(
            input_to_rfc3339("2025-03-01").as_deref(),
            Some("2025-03-01T00:00:00+00:00")
        );
        assert_eq!(input_to_rfc3339("soon"), None);
        assert_eq!(input_to_rfc3339(""), None);
    }

    #[test]
    fn test_backend_dates_to_inputs() {
        assert_eq!(rfc3339_to_input("2025-03-01T09:30:00Z"), "2025-03-01T09:30");
        assert_eq!(rfc3339_to_input("2025-03-01T09:30:00.123"), "2025-03-01T09:30");
        assert_eq!(rfc3339_to_input("garbage"), "");
        assert_eq!(short_date("2025-03-01T09:30:00Z"), "2025-03-01");
        assert_eq!(short_date("n/a"), "n/a");
    }
}
