// src/export/model.rs

use crate::models::{CheckIn, DATE_FMT, Member};
use chrono::NaiveDate;
use serde::Serialize;

pub const NOT_CHECKED_IN: &str = "Not checked in";
pub const PHOTO_UNAVAILABLE: &str = "Photo unavailable";

/// One member on one day, with the matching check-in if there is one.
#[derive(Debug, Clone, Copy)]
pub struct AttendanceRow<'a> {
    pub member: &'a str,
    pub date: NaiveDate,
    pub check_in: Option<&'a CheckIn>,
}

/// Day-major grid: for each day in `[start, end]`, one row per member in
/// roster order. An empty range yields no rows.
pub fn build_attendance<'a>(
    members: &'a [Member],
    check_ins: &'a [CheckIn],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<AttendanceRow<'a>> {
    let mut rows = Vec::new();

    for date in start.iter_days().take_while(|d| *d <= end) {
        for member in members {
            let check_in = check_ins
                .iter()
                .find(|ci| ci.member_name == member.name && ci.day() == date);

            rows.push(AttendanceRow {
                member: &member.name,
                date,
                check_in,
            });
        }
    }

    rows
}

/// "Flat" attendance record for CSV / JSON.
#[derive(Serialize, Clone, Debug)]
pub struct AttendanceExport {
    pub name: String,
    pub date: String,
    pub checked_in: bool,
    pub time: String,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub photo: String,
}

impl From<&AttendanceRow<'_>> for AttendanceExport {
    fn from(row: &AttendanceRow<'_>) -> Self {
        let date = row.date.format(DATE_FMT).to_string();

        match row.check_in {
            Some(ci) => Self {
                name: row.member.to_string(),
                date,
                checked_in: true,
                time: ci.time_str(),
                location: ci.location.clone(),
                latitude: Some(ci.latitude),
                longitude: Some(ci.longitude),
                photo: ci.photo_path.clone(),
            },
            None => Self {
                name: row.member.to_string(),
                date,
                checked_in: false,
                time: NOT_CHECKED_IN.to_string(),
                location: "-".to_string(),
                latitude: None,
                longitude: None,
                photo: "-".to_string(),
            },
        }
    }
}

pub(crate) fn to_flat(rows: &[AttendanceRow<'_>]) -> Vec<AttendanceExport> {
    rows.iter().map(AttendanceExport::from).collect()
}
