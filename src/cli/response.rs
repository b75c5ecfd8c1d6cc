//! JSON documents printed with `--json`.

use crate::errors::AppResult;
use crate::models::{CostCenterCount, PreviewRow, Statistics};
use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct ImportResponse {
    pub success: bool,
    pub message: String,
    pub records: usize,
    pub skipped: usize,
    pub unplaced: usize,
    pub statistics: Statistics,
}

#[derive(Serialize, Debug)]
pub struct PreviewResponse {
    pub success: bool,
    pub data: Vec<PreviewRow>,
    pub distribucion_centros_costo: Vec<CostCenterCount>,
    pub statistics: Statistics,
}

#[derive(Serialize, Debug)]
pub struct ExportResponse {
    pub success: bool,
    pub message: String,
    pub file: String,
    pub records: usize,
    pub archivos_eliminados: usize,
    pub registros_eliminados: usize,
}

#[derive(Serialize, Debug)]
pub struct CleanupResponse {
    pub success: bool,
    pub archivos_eliminados: usize,
    pub registros_eliminados: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Pretty-print `doc` on stdout.
pub fn print_json<T: Serialize>(doc: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(doc)?);
    Ok(())
}
