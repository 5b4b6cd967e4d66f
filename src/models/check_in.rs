use super::{DATE_FMT, DATETIME_FMT, TIME_FMT};
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CheckIn {
    pub id: i64,
    pub project_id: i64,
    pub member_name: String,
    pub check_in_time: NaiveDateTime, // ⇔ check_ins.check_in_time (TEXT, second precision)
    pub location: String,
    pub photo_path: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl CheckIn {
    /// Build a check-in not yet persisted (`id = 0`).
    /// Sub-second precision is dropped so that stored and in-memory values agree.
    pub fn new(
        project_id: i64,
        member_name: &str,
        check_in_time: NaiveDateTime,
        location: &str,
        photo_path: &str,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            id: 0,
            project_id,
            member_name: member_name.trim().to_string(),
            check_in_time: check_in_time.with_nanosecond(0).unwrap_or(check_in_time),
            location: location.to_string(),
            photo_path: photo_path.to_string(),
            latitude,
            longitude,
        }
    }

    pub fn day(&self) -> NaiveDate {
        self.check_in_time.date()
    }

    pub fn timestamp_str(&self) -> String {
        self.check_in_time.format(DATETIME_FMT).to_string()
    }

    pub fn date_str(&self) -> String {
        self.check_in_time.format(DATE_FMT).to_string()
    }

    pub fn time_str(&self) -> String {
        self.check_in_time.format(TIME_FMT).to_string()
    }
}
