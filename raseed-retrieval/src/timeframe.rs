//! Natural-language timeframe phrases used by the query tool.
//!
//! Maps phrases like "last week" or "yesterday" to an inclusive
//! `[start, end]` range. `now` is injected so callers (and tests) control
//! the reference point.

use chrono::{DateTime, Datelike, Duration, Utc};

/// Parse a timeframe phrase relative to `now`.
///
/// Recognized phrases (matched case-insensitively anywhere in the input):
/// `today`, `yesterday`, `last week`, `last two weeks`, `last month`.
/// Returns `None` for anything else.
pub fn parse_timeframe(
    phrase: &str,
    now: DateTime<Utc>,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let phrase = phrase.to_lowercase();

    if phrase.contains("last two weeks") {
        return Some((now - Duration::weeks(2), now));
    }
    if phrase.contains("last week") {
        return Some((now - Duration::weeks(1), now));
    }
    if phrase.contains("last month") {
        // First day of the previous month up to now.
        let first_of_this_month = start_of_day(now).with_day(1)?;
        let last_month = first_of_this_month - Duration::days(1);
        let start = start_of_day(last_month).with_day(1)?;
        return Some((start, now));
    }
    if phrase.contains("yesterday") {
        let yesterday = now - Duration::days(1);
        return Some((start_of_day(yesterday), end_of_day(yesterday)));
    }
    if phrase.contains("today") {
        return Some((start_of_day(now), end_of_day(now)));
    }

    None
}

fn start_of_day(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.date_naive().and_hms_opt(0, 0, 0).map(|naive| naive.and_utc()).unwrap_or(ts)
}

fn end_of_day(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.date_naive().and_hms_opt(23, 59, 59).map(|naive| naive.and_utc()).unwrap_or(ts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 14, 30, 0).unwrap()
    }

    #[test]
    fn today_spans_the_current_day() {
        let (start, end) = parse_timeframe("what did I buy today?", now()).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 3, 15, 23, 59, 59).unwrap());
    }

    #[test]
    fn yesterday_spans_the_previous_day() {
        let (start, end) = parse_timeframe("Yesterday", now()).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 3, 14, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 3, 14, 23, 59, 59).unwrap());
    }

    #[test]
    fn last_week_and_last_two_weeks() {
        let (start, end) = parse_timeframe("last week", now()).unwrap();
        assert_eq!(start, now() - Duration::weeks(1));
        assert_eq!(end, now());

        // "last two weeks" must not be shadowed by the "last week" substring.
        let (start, _) = parse_timeframe("from the last two weeks", now()).unwrap();
        assert_eq!(start, now() - Duration::weeks(2));
    }

    #[test]
    fn last_month_starts_at_the_first_of_the_previous_month() {
        let (start, end) = parse_timeframe("spending last month", now()).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());
        assert_eq!(end, now());
    }

    #[test]
    fn last_month_across_a_year_boundary() {
        let january = Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap();
        let (start, _) = parse_timeframe("last month", january).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2023, 12, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn unrecognized_phrases_yield_none() {
        assert!(parse_timeframe("around diwali", now()).is_none());
        assert!(parse_timeframe("", now()).is_none());
    }
}
