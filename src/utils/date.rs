use crate::errors::{AppError, AppResult};
use crate::models::DATETIME_FMT;
use chrono::{Local, NaiveDate, NaiveDateTime};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Accepts `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD HH:MM`.
pub fn parse_timestamp(s: &str) -> AppResult<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, DATETIME_FMT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M"))
        .map_err(|_| AppError::InvalidTime(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_with_or_without_seconds() {
        let full = parse_timestamp("2024-03-01 08:15:30").unwrap();
        assert_eq!(full.format(DATETIME_FMT).to_string(), "2024-03-01 08:15:30");

        let short = parse_timestamp("2024-03-01 08:15").unwrap();
        assert_eq!(short.format(DATETIME_FMT).to_string(), "2024-03-01 08:15:00");

        assert!(matches!(
            parse_timestamp("yesterday"),
            Err(AppError::InvalidTime(_))
        ));
    }
}
