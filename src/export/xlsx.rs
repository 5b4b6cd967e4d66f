// src/export/xlsx.rs

use crate::errors::AppResult;
use crate::export::ExportOptions;
use crate::export::excel_date::date_to_excel_serial;
use crate::export::model::{AttendanceRow, NOT_CHECKED_IN, PHOTO_UNAVAILABLE};
use crate::export::photo::{EmbeddedPhoto, photo_column_width, prepare_photo};
use crate::ui::messages::warning;
use rust_xlsxwriter::{
    Color, Format, FormatAlign, FormatBorder, FormatPattern, Image, ObjectMovement, Workbook,
};
use std::path::Path;

pub const SHEET_NAME: &str = "Check-in records";
pub const HEADERS: [&str; 5] = ["Name", "Date", "Time", "Location", "Photo"];
const COLUMN_WIDTHS: [f64; 5] = [15.0, 12.0, 10.0, 40.0, 50.0];
const PHOTO_COL: u16 = 4;

/// Render the attendance grid as an XLSX document.
pub(crate) fn render_xlsx(rows: &[AttendanceRow<'_>], opts: &ExportOptions) -> AppResult<Vec<u8>> {
    // Photos are prepared first: the photo column must have its final
    // width before images are fitted into it.
    let photos: Vec<Option<AppResult<EmbeddedPhoto>>> = rows
        .iter()
        .map(|row| {
            row.check_in
                .map(|ci| prepare_photo(Path::new(&ci.photo_path), opts.photo_quality))
        })
        .collect();

    let photo_width = photos
        .iter()
        .filter_map(|p| p.as_ref().and_then(|r| r.as_ref().ok()))
        .map(|p| photo_column_width(p.aspect_ratio(), opts.photo_row_height))
        .fold(None, |acc: Option<f64>, w| Some(acc.map_or(w, |a| a.max(w))));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    // ---------------------------
    // Header
    // ---------------------------
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xD9D9D9))
        .set_pattern(FormatPattern::Solid)
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin);

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_with_format(0, col as u16, *header, &header_format)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }
    if let Some(w) = photo_width {
        worksheet.set_column_width(PHOTO_COL, w)?;
    }

    // ---------------------------
    // Rows
    // ---------------------------
    let date_format = Format::new()
        .set_num_format("yyyy-mm-dd")
        .set_align(FormatAlign::Left)
        .set_align(FormatAlign::VerticalCenter);
    let text_format = Format::new().set_align(FormatAlign::VerticalCenter);

    for (i, (row, photo)) in rows.iter().zip(photos).enumerate() {
        let r = (i + 1) as u32;

        worksheet.write_with_format(r, 0, row.member, &text_format)?;
        worksheet.write_with_format(r, 1, date_to_excel_serial(row.date), &date_format)?;

        let Some(ci) = row.check_in else {
            worksheet.write_with_format(r, 2, NOT_CHECKED_IN, &text_format)?;
            worksheet.write_with_format(r, 3, "-", &text_format)?;
            worksheet.write_with_format(r, PHOTO_COL, "-", &text_format)?;
            continue;
        };

        worksheet.write_with_format(r, 2, ci.time_str(), &text_format)?;
        worksheet.write_with_format(r, 3, ci.location.as_str(), &text_format)?;

        match photo {
            Some(Ok(photo)) => {
                let image = Image::new_from_buffer(&photo.jpeg)?
                    .set_object_movement(ObjectMovement::MoveAndSizeWithCells);

                worksheet.set_row_height(r, opts.photo_row_height)?;
                worksheet.insert_image_fit_to_cell(r, PHOTO_COL, &image, true)?;
            }
            Some(Err(e)) => {
                warning(format!(
                    "Photo of {} on {} skipped ({}): {e}",
                    row.member,
                    row.date,
                    ci.photo_path
                ));
                worksheet.write_with_format(r, PHOTO_COL, PHOTO_UNAVAILABLE, &text_format)?;
            }
            None => {
                worksheet.write_with_format(r, PHOTO_COL, PHOTO_UNAVAILABLE, &text_format)?;
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}
