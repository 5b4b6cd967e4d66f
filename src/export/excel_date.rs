// src/export/excel_date.rs

use chrono::NaiveDate;

const EXCEL_EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(1899, 12, 30) {
    Some(d) => d,
    None => panic!("invalid Excel epoch"),
};

/// Excel serial number of a calendar day (1900 date system).
pub(crate) fn date_to_excel_serial(date: NaiveDate) -> f64 {
    (date - EXCEL_EPOCH).num_days() as f64
}
