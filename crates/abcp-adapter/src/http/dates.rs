/*
[INPUT]:  Caller-supplied date/time values (preformatted strings or chrono types)
[OUTPUT]: Strings in the exact format each API family expects
[POS]:    Formatting layer - shared by all namespace modules
[UPDATE]: When an endpoint turns out to want a different wire format
*/

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Date-time argument accepted by endpoint methods. Raw strings pass through
/// untouched so callers can supply whatever the vendor documentation shows.
#[derive(Debug, Clone)]
pub enum DateTimeArg {
    Raw(String),
    Naive(NaiveDateTime),
    Utc(DateTime<Utc>),
}

impl DateTimeArg {
    /// `cp/…` endpoints want `YYYY-MM-DD HH:MM:SS`.
    pub(crate) fn to_cp(&self) -> String {
        match self {
            DateTimeArg::Raw(s) => s.clone(),
            DateTimeArg::Naive(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            DateTimeArg::Utc(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    /// `cp/ts/…` endpoints want ISO 8601.
    pub(crate) fn to_ts(&self) -> String {
        match self {
            DateTimeArg::Raw(s) => s.clone(),
            DateTimeArg::Naive(dt) => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
            DateTimeArg::Utc(dt) => dt.to_rfc3339(),
        }
    }
}

impl From<&str> for DateTimeArg {
    fn from(s: &str) -> Self {
        DateTimeArg::Raw(s.to_owned())
    }
}

impl From<String> for DateTimeArg {
    fn from(s: String) -> Self {
        DateTimeArg::Raw(s)
    }
}

impl From<NaiveDateTime> for DateTimeArg {
    fn from(dt: NaiveDateTime) -> Self {
        DateTimeArg::Naive(dt)
    }
}

impl From<DateTime<Utc>> for DateTimeArg {
    fn from(dt: DateTime<Utc>) -> Self {
        DateTimeArg::Utc(dt)
    }
}

/// Date-only argument, used by a handful of endpoints (user birth dates,
/// garage update windows).
#[derive(Debug, Clone)]
pub enum DateArg {
    Raw(String),
    Date(NaiveDate),
}

impl DateArg {
    pub(crate) fn to_wire(&self) -> String {
        match self {
            DateArg::Raw(s) => s.clone(),
            DateArg::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }
}

impl From<&str> for DateArg {
    fn from(s: &str) -> Self {
        DateArg::Raw(s.to_owned())
    }
}

impl From<String> for DateArg {
    fn from(s: String) -> Self {
        DateArg::Raw(s)
    }
}

impl From<NaiveDate> for DateArg {
    fn from(d: NaiveDate) -> Self {
        DateArg::Date(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn naive() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(9, 15, 33)
            .unwrap()
    }

    #[rstest]
    #[case(DateTimeArg::from(naive()), "2024-03-05 09:15:33")]
    #[case(DateTimeArg::from("2024-03-05 09:15:33"), "2024-03-05 09:15:33")]
    fn test_cp_format(#[case] arg: DateTimeArg, #[case] expected: &str) {
        assert_eq!(arg.to_cp(), expected);
    }

    #[test]
    fn test_cp_format_utc() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 5, 9, 15, 33).unwrap();
        assert_eq!(DateTimeArg::from(dt).to_cp(), "2024-03-05 09:15:33");
    }

    #[rstest]
    #[case(DateTimeArg::from(naive()), "2024-03-05T09:15:33")]
    #[case(DateTimeArg::from("2024-03-05T09:15:33+03:00"), "2024-03-05T09:15:33+03:00")]
    fn test_ts_format(#[case] arg: DateTimeArg, #[case] expected: &str) {
        assert_eq!(arg.to_ts(), expected);
    }

    #[test]
    fn test_ts_format_utc_is_rfc3339() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 5, 9, 15, 33).unwrap();
        assert_eq!(DateTimeArg::from(dt).to_ts(), "2024-03-05T09:15:33+00:00");
    }

    #[test]
    fn test_date_arg() {
        let d = NaiveDate::from_ymd_opt(1990, 12, 1).unwrap();
        assert_eq!(DateArg::from(d).to_wire(), "1990-12-01");
        assert_eq!(DateArg::from("1990-12-01").to_wire(), "1990-12-01");
    }
}
