//! Unified application error type.
//! All modules (db, repo, core, export, cli) return AppError to keep the
//! error handling consistent and easy to manage.

use crate::location::LocationError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Database handle unavailable: {0}")]
    Handle(String),

    // ---------------------------
    // Parsing / validation errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("{0} must not be blank")]
    Blank(&'static str),

    // ---------------------------
    // Authorization
    // ---------------------------
    #[error("Wrong password for project {0}")]
    WrongPassword(i64),

    // ---------------------------
    // Lookups
    // ---------------------------
    #[error("Project {0} not found")]
    ProjectNotFound(i64),

    #[error("Member '{name}' not found in project {project_id}")]
    MemberNotFound { project_id: i64, name: String },

    #[error("Check-in {0} not found")]
    CheckInNotFound(i64),

    // ---------------------------
    // Location / photo
    // ---------------------------
    #[error("Location error: {0}")]
    Location(#[from] LocationError),

    #[error("Photo error: {0}")]
    Photo(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl From<image::ImageError> for AppError {
    fn from(e: image::ImageError) -> Self {
        AppError::Photo(e.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for AppError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        AppError::Export(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
