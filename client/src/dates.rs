//! Display formatting for the date strings the backend sends.
//!
//! The backend emits bare dates (`2025-06-10`), bare timestamps
//! (`2025-06-10T12:00:00`), and occasionally zoned timestamps. View models
//! keep them as strings; these helpers parse only at the point of display
//! and render an empty string for anything unparseable.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::debug;

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(zoned) = DateTime::parse_from_rfc3339(raw) {
        return Some(zoned.naive_utc());
    }
    if let Ok(timestamp) = raw.parse::<NaiveDateTime>() {
        return Some(timestamp);
    }
    raw.parse::<NaiveDate>()
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Format a backend date string as a short human date, e.g. `Jun 10, 2025`.
/// Unparseable input renders as an empty string.
pub fn format_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(timestamp) => timestamp.format("%b %-d, %Y").to_string(),
        None => {
            if !raw.is_empty() {
                debug!(raw, "unparseable date");
            }
            String::new()
        }
    }
}

/// Relative-time rendering against an explicit reference instant.
///
/// Buckets mirror the portal's original labels: under a minute is
/// "Just now", then minutes, hours, days, weeks (up to four), months
/// (thirty-day buckets), and years.
pub fn format_time_ago(raw: &str, now: NaiveDateTime) -> String {
    let Some(then) = parse_timestamp(raw) else {
        if !raw.is_empty() {
            debug!(raw, "unparseable timestamp");
        }
        return String::new();
    };

    let elapsed = now.signed_duration_since(then);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();
    let weeks = days / 7;
    let months = days / 30;

    if minutes < 1 {
        return "Just now".to_owned();
    }
    if minutes < 60 {
        return plural(minutes, "minute");
    }
    if hours < 24 {
        return plural(hours, "hour");
    }
    if days < 7 {
        return plural(days, "day");
    }
    if weeks < 4 {
        return plural(weeks, "week");
    }
    if months < 12 {
        return plural(months, "month");
    }
    plural(months / 12, "year")
}

/// Relative-time rendering against the current wall clock.
pub fn time_ago_from_now(raw: &str) -> String {
    format_time_ago(raw, Utc::now().naive_utc())
}

fn plural(count: i64, unit: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {unit}{suffix} ago")
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use chrono::NaiveDate;
    use rstest::rstest;

    use super::*;

    fn reference() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 7, 15)
            .expect("valid date")
            .and_hms_opt(12, 0, 0)
            .expect("valid time")
    }

    #[rstest]
    #[case("2025-06-10", "Jun 10, 2025")]
    #[case("2025-06-10T09:30:00", "Jun 10, 2025")]
    #[case("2025-01-05T09:30:00.250", "Jan 5, 2025")]
    #[case("2025-06-10T09:30:00Z", "Jun 10, 2025")]
    #[case("not-a-date", "")]
    #[case("", "")]
    fn formats_short_dates(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(format_date(raw), expected);
    }

    #[rstest]
    #[case("2025-07-15T11:59:40", "Just now")]
    #[case("2025-07-15T11:59:00", "1 minute ago")]
    #[case("2025-07-15T11:15:00", "45 minutes ago")]
    #[case("2025-07-15T09:00:00", "3 hours ago")]
    #[case("2025-07-13T12:00:00", "2 days ago")]
    #[case("2025-06-28T12:00:00", "2 weeks ago")]
    #[case("2025-02-15T12:00:00", "5 months ago")]
    #[case("2023-06-15T12:00:00", "2 years ago")]
    #[case("2025-07-15T13:00:00", "Just now")] // future timestamps clamp
    #[case("garbage", "")]
    fn buckets_relative_time(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(format_time_ago(raw, reference()), expected);
    }

    #[test]
    fn exactly_one_hour_reads_in_hours() {
        assert_eq!(
            format_time_ago("2025-07-15T11:00:00", reference()),
            "1 hour ago"
        );
    }
}
