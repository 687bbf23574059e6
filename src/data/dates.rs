//! Lenient timestamp parsing for registration dates.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Tokens treated as missing values.
const NULL_TOKENS: [&str; 7] = ["", "nan", "nat", "null", "none", "na", "n/a"];

const DATETIME_FORMATS: [&str; 7] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
];

// Month first before day first: `03/09/2015` is March 9, `31/12/2020` can
// only be day first.
const DATE_FORMATS: [&str; 9] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d-%b-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%Y%m%d",
];

/// Parse a registration timestamp.
///
/// Accepts RFC 3339 (offsets are dropped, keeping local wall time), ISO
/// dates and datetimes, compact `YYYYMMDD`, slash separated dates (year
/// first, month first, or day first when the month reading is invalid),
/// dash separated `MM-DD-YYYY`, `DD-Mon-YYYY` and `Mon D, YYYY`. Returns
/// `None` for null tokens and anything else.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if NULL_TOKENS.iter().any(|t| t.eq_ignore_ascii_case(text)) {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date.and_time(chrono::NaiveTime::MIN));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn ymd(dt: NaiveDateTime) -> (i32, u32, u32) {
        (dt.year(), dt.month(), dt.day())
    }

    #[test]
    fn parses_iso_dates_and_datetimes() {
        assert_eq!(ymd(parse_timestamp("2015-03-09").unwrap()), (2015, 3, 9));
        let dt = parse_timestamp("2015-03-09 14:30:00").unwrap();
        assert_eq!((dt.hour(), dt.minute()), (14, 30));
        assert_eq!(ymd(parse_timestamp("2015-03-09T14:30:00.250").unwrap()), (2015, 3, 9));
        assert_eq!(ymd(parse_timestamp("2015-03-09 14:30").unwrap()), (2015, 3, 9));
    }

    #[test]
    fn parses_rfc3339_keeping_wall_time() {
        let dt = parse_timestamp("2020-12-31T23:30:00+05:30").unwrap();
        assert_eq!(ymd(dt), (2020, 12, 31));
        assert_eq!(dt.hour(), 23);
    }

    #[test]
    fn parses_slash_and_named_month_formats() {
        assert_eq!(ymd(parse_timestamp("2019/07/04").unwrap()), (2019, 7, 4));
        // Month first, as pandas does by default
        assert_eq!(ymd(parse_timestamp("07/04/2019").unwrap()), (2019, 7, 4));
        assert_eq!(ymd(parse_timestamp("04-Jul-2019").unwrap()), (2019, 7, 4));
    }

    #[test]
    fn day_first_only_when_month_first_fails() {
        assert_eq!(ymd(parse_timestamp("31/12/2020").unwrap()), (2020, 12, 31));
        assert_eq!(ymd(parse_timestamp("03/09/2015").unwrap()), (2015, 3, 9));
        assert_eq!(ymd(parse_timestamp("3/9/2015").unwrap()), (2015, 3, 9));
        assert_eq!(ymd(parse_timestamp("25/06/2018 08:15:00").unwrap()), (2018, 6, 25));
    }

    #[test]
    fn parses_compact_dashed_and_written_month_dates() {
        assert_eq!(ymd(parse_timestamp("20150309").unwrap()), (2015, 3, 9));
        assert_eq!(ymd(parse_timestamp("09-03-2015").unwrap()), (2015, 9, 3));
        assert_eq!(ymd(parse_timestamp("Mar 9, 2015").unwrap()), (2015, 3, 9));
        assert_eq!(ymd(parse_timestamp("March 9, 2015").unwrap()), (2015, 3, 9));
        assert_eq!(ymd(parse_timestamp("2015-03-09 00:00:00+00:00").unwrap()), (2015, 3, 9));
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(ymd(parse_timestamp("  2001-01-01 ").unwrap()), (2001, 1, 1));
    }

    #[test]
    fn nulls_and_garbage_are_none() {
        for text in ["", "NaN", "NaT", "null", "None", "n/a", "not a date", "2020-13-01", "31/31/2020", "2015030"] {
            assert!(parse_timestamp(text).is_none(), "{text:?} should not parse");
        }
    }
}
