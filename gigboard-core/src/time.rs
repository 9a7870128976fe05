use chrono::{NaiveDateTime, ParseError, Utc};

/// The timestamp format shows are submitted, stored, and displayed in.
/// Fixed-width, so comparing the stored text is the same as comparing the time.
pub const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn parse_start_time(value: &str) -> Result<NaiveDateTime, ParseError> {
    NaiveDateTime::parse_from_str(value, START_TIME_FORMAT)
}

pub fn format_start_time(value: NaiveDateTime) -> String {
    value.format(START_TIME_FORMAT).to_string()
}

/// The evaluation time used to classify shows as past or upcoming.
/// Sampled once per request, never persisted.
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_and_format_round_trip() {
        let parsed = parse_start_time("2099-01-01 20:00:00").unwrap();
        assert_eq!(format_start_time(parsed), "2099-01-01 20:00:00");
    }

    #[test]
    fn test_rejects_malformed_timestamps() {
        assert!(parse_start_time("2099-01-01").is_err());
        assert!(parse_start_time("01/01/2099 20:00").is_err());
        assert!(parse_start_time("not a time").is_err());
    }
}
