use crate::errors::{AppError, AppResult};

/// Trimmed value of a required text field.
pub fn required<'a>(field: &'static str, value: &'a str) -> AppResult<&'a str> {
    let v = value.trim();
    if v.is_empty() {
        Err(AppError::Blank(field))
    } else {
        Ok(v)
    }
}
