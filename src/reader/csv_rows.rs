use crate::errors::{AppError, AppResult};
use std::fs;
use std::io::Cursor;
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub(super) struct CsvRows {
    headers: Vec<String>,
    records: csv::StringRecordsIntoIter<Cursor<Vec<u8>>>,
}

impl CsvRows {
    pub(super) fn open(path: &Path, delimiter: u8) -> AppResult<Self> {
        let bytes = fs::read(path)?;
        let bytes = match bytes.strip_prefix(UTF8_BOM) {
            Some(rest) => rest.to_vec(),
            None => bytes,
        };

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(Cursor::new(bytes));

        let headers = rdr
            .headers()
            .map_err(|e| match AppError::from(e) {
                AppError::Parse { reason, .. } => AppError::Parse {
                    location: "header row".to_string(),
                    reason,
                },
                other => other,
            })?
            .iter()
            .map(str::to_string)
            .collect();

        Ok(Self {
            headers,
            records: rdr.into_records(),
        })
    }

    pub(super) fn headers(&self) -> &[String] {
        &self.headers
    }

    pub(super) fn next_cells(&mut self) -> Option<AppResult<(usize, Vec<String>)>> {
        let record = self.records.next()?;

        Some(record.map_err(AppError::from).map(|rec| {
            let line = rec.position().map(|p| p.line() as usize).unwrap_or(0);
            let cells = rec.iter().map(str::to_string).collect();
            (line, cells)
        }))
    }
}
