//! Unified application error type.
//! All modules (db, reader, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

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

    // ---------------------------
    // Input file errors
    // ---------------------------
    #[error("Unsupported file format '{0}': use csv, xlsx or xls")]
    UnsupportedFormat(String),

    #[error("Unreadable file at {location}: {reason}")]
    Parse { location: String, reason: String },

    #[error(transparent)]
    RowCoercion(#[from] RowCoercionError),

    #[error("The file does not contain any valid inventory row")]
    NoValidRows,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error(
        "No processed data to export. Import an inventory file first (rcontapyme import <FILE>)"
    )]
    EmptyBatch,

    #[error("Export error: {0}")]
    Export(String),

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
    // Serialization
    // ---------------------------
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// A single source row that could not be turned into a record.
/// Collected per row; it never aborts the batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Row {line}: {reason} (INUMSOP = '{value}')")]
pub struct RowCoercionError {
    pub line: usize,
    pub value: String,
    pub reason: String,
}

impl From<csv::Error> for AppError {
    fn from(e: csv::Error) -> Self {
        let location = match e.position() {
            Some(pos) => format!("line {}", pos.line()),
            None => "unknown position".to_string(),
        };

        match e.into_kind() {
            csv::ErrorKind::Io(io_err) => AppError::Io(io_err),
            kind => AppError::Parse {
                location,
                reason: csv_kind_reason(&kind),
            },
        }
    }
}

fn csv_kind_reason(kind: &csv::ErrorKind) -> String {
    match kind {
        csv::ErrorKind::Utf8 { err, .. } => format!("invalid UTF-8 text ({err})"),
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("expected {expected_len} fields, found {len}"),
        other => format!("{other:?}"),
    }
}
