//! Date display for subscription timestamps, in the page's `zh-CN` short form.

use chrono::{DateTime, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};

/// Shown by `format_date` when no date is known.
pub const UNKNOWN_DATE: &str = "未知";

/// Shown by `format_date_time` when a subscription was never checked.
pub const NEVER_CHECKED: &str = "从未检测";

/// Shown when the input is present but not a recognizable date.
pub const INVALID_DATE: &str = "Invalid Date";

const DATE_FORMAT: &str = "%Y/%-m/%-d";
const DATE_TIME_FORMAT: &str = "%Y/%-m/%-d %H:%M:%S";

const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// `2024/1/5` in local time, or `UNKNOWN_DATE` for absent/empty input.
pub fn format_date(input: Option<&str>) -> String {
    format_date_in(input, &Local)
}

/// `2024/1/5 14:03:07` in local time, or `NEVER_CHECKED` for absent/empty input.
pub fn format_date_time(input: Option<&str>) -> String {
    format_date_time_in(input, &Local)
}

pub fn format_date_in<Tz: TimeZone>(input: Option<&str>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    render(input, tz, UNKNOWN_DATE, DATE_FORMAT)
}

pub fn format_date_time_in<Tz: TimeZone>(input: Option<&str>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    render(input, tz, NEVER_CHECKED, DATE_TIME_FORMAT)
}

fn render<Tz: TimeZone>(input: Option<&str>, tz: &Tz, placeholder: &str, format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let Some(raw) = input.filter(|s| !s.is_empty()) else {
        return placeholder.to_string();
    };
    match parse_instant(raw, tz) {
        Some(instant) => instant.format(format).to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// Offset-bearing timestamps are converted into `tz`; naive date-times are
/// read as wall time in `tz`; bare dates are UTC midnight, as browsers read them.
///
/// A wall time skipped by a DST transition is read with the offset in force
/// before the gap, which lands it just past the gap (02:30 becomes 03:30).
fn parse_instant<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(tz));
    }
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return wall_time(naive, tz);
        }
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let midnight = Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?);
    Some(midnight.with_timezone(tz))
}

fn wall_time<Tz: TimeZone>(naive: NaiveDateTime, tz: &Tz) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(instant) => Some(instant),
        LocalResult::Ambiguous(earlier, _) => Some(earlier),
        LocalResult::None => {
            let before = tz.from_local_datetime(&(naive - Duration::days(1))).earliest()?;
            let offset = before.offset().fix().local_minus_utc();
            let utc = naive - Duration::seconds(i64::from(offset));
            Some(Utc.from_utc_datetime(&utc).with_timezone(tz))
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    fn beijing() -> FixedOffset {
        FixedOffset::east_opt(8 * 3600).unwrap()
    }

    #[test]
    fn absent_or_empty_input_uses_placeholders() {
        assert_eq!(format_date(None), UNKNOWN_DATE);
        assert_eq!(format_date(Some("")), UNKNOWN_DATE);
        assert_eq!(format_date_time(None), NEVER_CHECKED);
        assert_eq!(format_date_time(Some("")), NEVER_CHECKED);
    }

    #[test]
    fn rfc3339_is_shifted_into_target_zone() {
        let tz = beijing();
        assert_eq!(format_date_in(Some("2024-01-05T14:03:07Z"), &tz), "2024/1/5");
        assert_eq!(
            format_date_time_in(Some("2024-01-05T14:03:07Z"), &tz),
            "2024/1/5 22:03:07"
        );
        assert_eq!(format_date_in(Some("2024-12-31T20:00:00+00:00"), &tz), "2025/1/1");
    }

    #[test]
    fn naive_timestamps_are_wall_time() {
        let tz = beijing();
        assert_eq!(
            format_date_time_in(Some("2024-03-09T08:05:00.123456"), &tz),
            "2024/3/9 08:05:00"
        );
        assert_eq!(
            format_date_time_in(Some("2024-03-09 23:59:59"), &tz),
            "2024/3/9 23:59:59"
        );
    }

    #[test]
    fn wall_time_in_spring_forward_gap_moves_past_it() {
        let tz = chrono_tz::America::New_York;
        assert_eq!(
            format_date_time_in(Some("2024-03-10T02:30:00"), &tz),
            "2024/3/10 03:30:00"
        );
        assert_eq!(format_date_in(Some("2024-03-10 02:00:00"), &tz), "2024/3/10");
    }

    #[test]
    fn repeated_wall_time_takes_the_earlier_instant() {
        let tz = chrono_tz::America::New_York;
        let out = format_date_time_in(Some("2024-11-03T01:30:00"), &tz);
        assert_eq!(out, "2024/11/3 01:30:00");
        assert_eq!(
            format_date_time_in(Some("2024-11-03T05:30:00Z"), &tz),
            "2024/11/3 01:30:00"
        );
    }

    #[test]
    fn bare_dates_are_utc_midnight() {
        assert_eq!(format_date_in(Some("2024-03-09"), &Utc), "2024/3/9");
        let new_york = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(format_date_in(Some("2024-03-09"), &new_york), "2024/3/8");
    }

    #[test]
    fn garbage_is_invalid_date() {
        assert_eq!(format_date(Some("yesterday")), INVALID_DATE);
        assert_eq!(format_date_time(Some("2024-13-40")), INVALID_DATE);
    }

    #[test]
    fn local_rendering_is_non_empty() {
        let out = format_date(Some("2024-06-15T12:00:00Z"));
        assert!(!out.is_empty());
        assert_ne!(out, UNKNOWN_DATE);
        assert_ne!(out, INVALID_DATE);
        assert!(out.starts_with("2024/6/"));
    }
}
