//! Row parser: turns an uploaded CSV/XLSX/XLS file into a lazy sequence of
//! raw rows (column name → raw value). No business validation happens here.

mod csv_rows;
mod excel_date;
mod sheet;

pub(crate) use excel_date::serial_to_date;

use crate::errors::{AppError, AppResult};
use clap::ValueEnum;
use std::collections::HashMap;
use std::path::Path;

/// Declared kind of an uploaded file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SourceFormat {
    Csv,
    Xlsx,
    Xls,
}

impl SourceFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::Csv => "csv",
            SourceFormat::Xlsx => "xlsx",
            SourceFormat::Xls => "xls",
        }
    }

    pub fn from_extension(ext: &str) -> AppResult<Self> {
        match ext.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "csv" => Ok(SourceFormat::Csv),
            "xlsx" => Ok(SourceFormat::Xlsx),
            "xls" => Ok(SourceFormat::Xls),
            other => Err(AppError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn from_path(path: &Path) -> AppResult<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_default();
        Self::from_extension(&ext)
    }
}

/// Options the parser needs from the configuration.
#[derive(Clone, Debug)]
pub struct ReadOptions {
    pub delimiter: u8,
    pub sheet: Option<String>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            sheet: None,
        }
    }
}

/// One row as read from the file. Keys are folded column names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub line: usize,
    fields: HashMap<String, String>,
}

impl RawRow {
    /// Pair `cells` with `headers` (already folded). Missing trailing cells read as empty,
    /// columns without a header are dropped, the first of duplicated headers wins.
    pub fn new(line: usize, headers: &[String], cells: Vec<String>) -> Self {
        let mut fields = HashMap::with_capacity(headers.len());
        let mut cells = cells.into_iter();

        for header in headers {
            let value = cells.next().unwrap_or_default();
            if header.is_empty() {
                continue;
            }
            fields.entry(header.clone()).or_insert(value);
        }

        Self { line, fields }
    }

    /// Build a row from (column, value) pairs; column names are folded.
    pub fn from_pairs<K: AsRef<str>, V: Into<String>>(
        line: usize,
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        let mut fields = HashMap::new();
        for (k, v) in pairs {
            fields.entry(fold_header(k.as_ref())).or_insert(v.into());
        }
        Self { line, fields }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(&fold_header(column)).map(String::as_str)
    }

    /// Value of the first alias present in the row, trimmed; empty when none is.
    pub fn first_of(&self, aliases: &[&str]) -> &str {
        aliases
            .iter()
            .find_map(|a| self.get(a))
            .map(str::trim)
            .unwrap_or("")
    }

    pub fn is_blank(&self) -> bool {
        self.fields.values().all(|v| v.trim().is_empty())
    }
}

/// Fold a header for matching: trim, lowercase, strip Spanish accents,
/// and turn spaces, dashes and slashes into `_`.
pub fn fold_header(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.trim().trim_start_matches('\u{feff}').chars() {
        let mapped = match c {
            'á' | 'Á' | 'à' | 'À' => 'a',
            'é' | 'É' | 'è' | 'È' => 'e',
            'í' | 'Í' | 'ì' | 'Ì' => 'i',
            'ó' | 'Ó' | 'ò' | 'Ò' => 'o',
            'ú' | 'Ú' | 'ù' | 'Ù' | 'ü' | 'Ü' => 'u',
            'ñ' | 'Ñ' => 'n',
            ' ' | '-' | '/' | '.' => '_',
            other => other.to_ascii_lowercase(),
        };
        // collapse runs of separators ("Categoría / Descripción")
        if mapped == '_' && out.ends_with('_') {
            continue;
        }
        out.push(mapped);
    }
    out
}

enum RowSource {
    Csv(csv_rows::CsvRows),
    Sheet(sheet::SheetRows),
}

/// Lazy, finite, non-restartable sequence of raw rows in file order.
/// Fully blank rows are skipped.
pub struct RowReader {
    headers: Vec<String>,
    source: RowSource,
}

impl RowReader {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

impl Iterator for RowReader {
    type Item = AppResult<RawRow>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let next = match &mut self.source {
                RowSource::Csv(rows) => rows.next_cells(),
                RowSource::Sheet(rows) => rows.next_cells(),
            };

            match next? {
                Ok((line, cells)) => {
                    let row = RawRow::new(line, &self.headers, cells);
                    if row.is_blank() {
                        continue;
                    }
                    return Some(Ok(row));
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Open `path` as the declared `format`.
pub fn open(path: &Path, format: SourceFormat, opts: &ReadOptions) -> AppResult<RowReader> {
    let (headers, source) = match format {
        SourceFormat::Csv => {
            let rows = csv_rows::CsvRows::open(path, opts.delimiter)?;
            (rows.headers().to_vec(), RowSource::Csv(rows))
        }
        SourceFormat::Xlsx | SourceFormat::Xls => {
            let rows = sheet::SheetRows::open(path, format, opts.sheet.as_deref())?;
            (rows.headers().to_vec(), RowSource::Sheet(rows))
        }
    };

    let headers = headers.iter().map(|h| fold_header(h)).collect();

    Ok(RowReader { headers, source })
}
