//! Field checks shared by the services, plus the request deadline.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::future::Future;
use std::time::Duration;

use crate::domain::error::{FarmError, FarmResult};

pub const MAX_NAME_LEN: usize = 100;
const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Trimmed, non-empty text of at most `max` characters.
pub fn required_text(field: &str, value: &str, max: usize) -> FarmResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FarmError::validation(format!("{field} cannot be empty")));
    }
    if trimmed.chars().count() > max {
        return Err(FarmError::validation(format!(
            "{field} cannot exceed {max} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Blank optional text collapses to `None`.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn calendar_date(field: &str, value: &str) -> FarmResult<String> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map(|date| date.format(DATE_FORMAT).to_string())
        .map_err(|_| FarmError::validation(format!("{field} must be YYYY-MM-DD, got {value:?}")))
}

/// Strict `YYYY-MM-DD HH:MM:SS`, normalised.
pub fn date_time(field: &str, value: &str) -> FarmResult<String> {
    NaiveDateTime::parse_from_str(value.trim(), DATE_TIME_FORMAT)
        .map(|moment| moment.format(DATE_TIME_FORMAT).to_string())
        .map_err(|_| {
            FarmError::validation(format!("{field} must be YYYY-MM-DD HH:MM:SS, got {value:?}"))
        })
}

/// Accepts RFC 3339 or `YYYY-MM-DD HH:MM:SS`; the value is kept as given.
pub fn timestamp(field: &str, value: &str) -> FarmResult<String> {
    let value = value.trim();
    let parses = DateTime::parse_from_rfc3339(value).is_ok()
        || NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT).is_ok();
    if !parses {
        return Err(FarmError::validation(format!(
            "{field} must be RFC 3339 or YYYY-MM-DD HH:MM:SS, got {value:?}"
        )));
    }
    Ok(value.to_string())
}

pub fn non_negative(field: &str, value: i64) -> FarmResult<i64> {
    if value < 0 {
        return Err(FarmError::validation(format!("{field} cannot be negative")));
    }
    Ok(value)
}

pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Run `operation` under the request deadline. Expiry drops the in-flight
/// storage call and fails the whole operation.
pub async fn with_deadline<T, F>(limit: Duration, operation: F) -> FarmResult<T>
where
    F: Future<Output = FarmResult<T>>,
{
    match tokio::time::timeout(limit, operation).await {
        Ok(result) => result,
        Err(_) => Err(FarmError::Timeout(limit)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert_eq!(required_text("name", "  Daisy ", 100).unwrap(), "Daisy");
        assert!(required_text("name", "   ", 100).is_err());
        assert!(required_text("name", &"x".repeat(101), 100).is_err());
    }

    #[test]
    fn test_calendar_date() {
        assert_eq!(calendar_date("day", "2024-02-29").unwrap(), "2024-02-29");
        assert!(calendar_date("day", "2023-02-29").is_err());
        assert!(calendar_date("day", "29/02/2024").is_err());
    }

    #[test]
    fn test_date_time() {
        assert_eq!(
            date_time("get_time", " 2024-05-01 06:30:00 ").unwrap(),
            "2024-05-01 06:30:00"
        );
        assert!(date_time("get_time", "2024-05-01").is_err());
        assert!(date_time("get_time", "2024-05-01T06:30:00Z").is_err());
    }

    #[test]
    fn test_timestamp_accepts_both_layouts() {
        assert!(timestamp("time", "2024-05-01T08:30:00+03:00").is_ok());
        assert!(timestamp("time", "2024-05-01 08:30:00").is_ok());
        assert!(timestamp("time", "yesterday").is_err());
    }

    #[tokio::test]
    async fn test_with_deadline_times_out() {
        let result: FarmResult<()> =
            with_deadline(Duration::from_millis(10), std::future::pending()).await;
        assert!(matches!(result, Err(FarmError::Timeout(_))));

        let ok = with_deadline(Duration::from_secs(1), async { Ok(7) }).await;
        assert_eq!(ok.unwrap(), 7);
    }
}
