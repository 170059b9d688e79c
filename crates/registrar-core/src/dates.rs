//! # Date Helpers
//!
//! Pure calendar utilities. Functions that depend on "now" take it as a
//! parameter so the result is deterministic.

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};

/// Formats tried, in order, by [`parse_flexible_date`].
pub const FLEXIBLE_DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%d-%m-%Y", "%Y/%m/%d"];

/// Monday through Friday.
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Business days in `[start, end]`, both ends inclusive.
///
/// Returns 0 when `start > end`.
///
/// ```rust
/// use chrono::NaiveDate;
/// use registrar_core::dates::business_days_between;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
/// assert_eq!(business_days_between(start, end), 23);
/// ```
pub fn business_days_between(start: NaiveDate, end: NaiveDate) -> u32 {
    let mut days = 0;
    let mut current = Some(start);

    while let Some(date) = current.filter(|d| *d <= end) {
        if is_business_day(date) {
            days += 1;
        }
        current = date.succ_opt();
    }

    days
}

/// Parses a date in the first of [`FLEXIBLE_DATE_FORMATS`] that fits.
pub fn parse_flexible_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    FLEXIBLE_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

/// Human-readable age of `then` relative to `now`.
///
/// Thresholds: more than 365 days → years, more than 30 days → months,
/// any whole day → days, then hours and minutes within the day.
/// Anything under a minute, or in the future, is "just now".
pub fn format_relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now - then;
    let days = diff.num_days();
    let seconds = diff.num_seconds() - days * 86_400;

    if diff.num_seconds() < 0 {
        "just now".to_string()
    } else if days > 365 {
        format!("{} years ago", days / 365)
    } else if days > 30 {
        format!("{} months ago", days / 30)
    } else if days > 0 {
        format!("{} days ago", days)
    } else if seconds > 3600 {
        format!("{} hours ago", seconds / 3600)
    } else if seconds > 60 {
        format!("{} minutes ago", seconds / 60)
    } else {
        "just now".to_string()
    }
}
