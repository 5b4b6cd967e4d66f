// src/export/mod.rs

mod excel_date;
pub mod fs_utils;
mod json_csv;
pub mod model;
pub mod photo;
pub mod range;
pub mod xlsx;

pub use model::{AttendanceExport, AttendanceRow, build_attendance};
pub use range::parse_range;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{CheckIn, Member};
use crate::ui::messages::{error, info, success};
use chrono::NaiveDate;
use clap::ValueEnum;
use std::io::Write;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Xlsx,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// JPEG quality of embedded photos.
    pub photo_quality: u8,
    /// Height, in points, of rows that carry a photo.
    pub photo_row_height: f64,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Xlsx,
            photo_quality: 70,
            photo_row_height: 150.0,
        }
    }
}

impl ExportOptions {
    pub fn from_config(cfg: &Config, format: ExportFormat) -> Self {
        Self {
            format,
            photo_quality: cfg.photo_quality,
            photo_row_height: cfg.photo_row_height,
        }
    }
}

/// Helper shared by every format for the completion message.
pub(crate) fn notify_export_success(label: &str, path: &Path, rows: usize) {
    success(format!("{label} export completed ({rows} rows): {}", path.display()));
}

/// Export attendance for every member on every day of `[start, end]`.
///
/// Returns `false` on any failure; the reason is reported on stderr and no
/// file is left at `target`.
pub fn export_attendance(
    members: &[Member],
    check_ins: &[CheckIn],
    start: NaiveDate,
    end: NaiveDate,
    target: &Path,
    opts: &ExportOptions,
) -> bool {
    match try_export_attendance(members, check_ins, start, end, target, opts) {
        Ok(rows) => {
            notify_export_success(&opts.format.as_str().to_uppercase(), target, rows);
            true
        }
        Err(e) => {
            error(format!("Export failed: {e}"));
            false
        }
    }
}

/// Same as [`export_attendance`] but keeps the error. Returns the number of
/// data rows written.
pub fn try_export_attendance(
    members: &[Member],
    check_ins: &[CheckIn],
    start: NaiveDate,
    end: NaiveDate,
    target: &Path,
    opts: &ExportOptions,
) -> AppResult<usize> {
    if start > end {
        return Err(AppError::InvalidRange(format!("{start} is after {end}")));
    }

    info(format!(
        "Exporting to {}: {}",
        opts.format.as_str().to_uppercase(),
        target.display()
    ));

    let rows = build_attendance(members, check_ins, start, end);

    fs_utils::write_atomically(target, |file| match opts.format {
        ExportFormat::Xlsx => {
            let bytes = xlsx::render_xlsx(&rows, opts)?;
            file.write_all(&bytes)?;
            Ok(())
        }
        ExportFormat::Csv => json_csv::write_csv(&rows, file),
        ExportFormat::Json => json_csv::write_json(&rows, file),
    })?;

    Ok(rows.len())
}
