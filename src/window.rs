//! Trailing extraction window arithmetic

use chrono::{DateTime, Days, NaiveDate, Utc};

use crate::constants::WINDOW_DAYS;

/// Midnight (UTC) of the day `now` falls on
pub fn truncate_to_midnight(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(chrono::NaiveTime::MIN).and_utc()
}

/// Start of the trailing window: midnight of `now` minus WINDOW_DAYS
pub fn window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    truncate_to_midnight(now) - Days::new(WINDOW_DAYS)
}

/// Value for the `after` query parameter (milliseconds since the epoch)
pub fn after_param_millis(window_start: DateTime<Utc>) -> i64 {
    window_start.timestamp_millis()
}

/// Parse the date component (first 10 characters, YYYY-MM-DD) of a played_at value
pub fn played_at_date(played_at: &str) -> Option<NaiveDate> {
    let date_part = played_at.get(0..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_window_start_truncates_and_subtracts_seven_days() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 17, 42, 9).unwrap();
        let start = window_start(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 3, 8, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_window_start_at_exact_midnight() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        // Crosses a leap-day month boundary
        assert_eq!(
            window_start(now),
            Utc.with_ymd_and_hms(2024, 2, 23, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_after_param_is_epoch_millis() {
        let start = Utc.with_ymd_and_hms(2024, 3, 8, 0, 0, 0).unwrap();
        assert_eq!(after_param_millis(start), 1_709_856_000_000);
    }

    #[test]
    fn test_played_at_date_parsing() {
        assert_eq!(
            played_at_date("2024-03-10T08:15:30.123Z"),
            NaiveDate::from_ymd_opt(2024, 3, 10)
        );
        assert_eq!(played_at_date("2024-03-10"), NaiveDate::from_ymd_opt(2024, 3, 10));
        assert_eq!(played_at_date("yesterday"), None);
        assert_eq!(played_at_date(""), None);
        assert_eq!(played_at_date("2024-13-40T00:00:00Z"), None);
    }
}
