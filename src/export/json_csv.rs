// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{AttendanceRow, to_flat};
use std::io::Write;

/// Pretty-printed JSON array of attendance records.
pub(crate) fn write_json<W: Write>(rows: &[AttendanceRow<'_>], out: W) -> AppResult<()> {
    serde_json::to_writer_pretty(out, &to_flat(rows))
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))
}

/// CSV with a header row (field names come from serde).
pub(crate) fn write_csv<W: Write>(rows: &[AttendanceRow<'_>], out: W) -> AppResult<()> {
    let mut wtr = csv::Writer::from_writer(out);

    for item in to_flat(rows) {
        wtr.serialize(item)
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }

    wtr.flush()?;
    Ok(())
}
