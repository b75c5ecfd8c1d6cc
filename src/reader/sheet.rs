use super::SourceFormat;
use super::excel_date::serial_to_date;
use crate::errors::{AppError, AppResult};
use calamine::{Data, Range, Reader, Xls, XlsError, Xlsx, XlsxError, open_workbook};
use std::fmt::Display;
use std::io::{Read, Seek};
use std::path::Path;

/// Rows of one worksheet. calamine loads the whole range; rows are handed out one by one.
pub(super) struct SheetRows {
    headers: Vec<String>,
    rows: std::vec::IntoIter<Vec<String>>,
    next_line: usize,
}

impl SheetRows {
    pub(super) fn open(path: &Path, format: SourceFormat, sheet: Option<&str>) -> AppResult<Self> {
        let range = match format {
            SourceFormat::Xlsx => {
                let mut wb: Xlsx<_> = open_workbook(path).map_err(|e: XlsxError| container(e))?;
                worksheet(&mut wb, sheet)?
            }
            SourceFormat::Xls => {
                let mut wb: Xls<_> = open_workbook(path).map_err(|e: XlsError| container(e))?;
                worksheet(&mut wb, sheet)?
            }
            SourceFormat::Csv => {
                return Err(AppError::Other(
                    "CSV files are not read as worksheets".to_string(),
                ));
            }
        };

        // 1-based sheet row of the header (ranges may not start at A1)
        let header_line = range.start().map(|(r, _)| r as usize + 1).unwrap_or(1);

        let mut rows = range
            .rows()
            .map(|r| r.iter().map(cell_to_string).collect::<Vec<_>>());

        let headers = rows.next().unwrap_or_default();
        let rows: Vec<Vec<String>> = rows.collect();

        Ok(Self {
            headers,
            rows: rows.into_iter(),
            next_line: header_line + 1,
        })
    }

    pub(super) fn headers(&self) -> &[String] {
        &self.headers
    }

    pub(super) fn next_cells(&mut self) -> Option<AppResult<(usize, Vec<String>)>> {
        let cells = self.rows.next()?;
        let line = self.next_line;
        self.next_line += 1;
        Some(Ok((line, cells)))
    }
}

fn container<E: Display>(e: E) -> AppError {
    AppError::Parse {
        location: "workbook container".to_string(),
        reason: e.to_string(),
    }
}

/// The configured worksheet, or the first one.
fn worksheet<RS, R>(workbook: &mut R, sheet: Option<&str>) -> AppResult<Range<Data>>
where
    RS: Read + Seek,
    R: Reader<RS>,
    R::Error: Display,
{
    let name = match sheet {
        Some(s) => s.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| AppError::Parse {
                location: "workbook".to_string(),
                reason: "no worksheet found".to_string(),
            })?,
    };

    workbook
        .worksheet_range(&name)
        .map_err(|e| AppError::Parse {
            location: format!("sheet '{name}'"),
            reason: e.to_string(),
        })
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(v) => v.trim().to_string(),
        Data::Float(v) => v.to_string(),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(v) => match serial_to_date(v.as_f64()) {
            Some(d) => d.format("%Y-%m-%d").to_string(),
            None => v.as_f64().to_string(),
        },
        Data::DateTimeIso(v) => v.to_string(),
        Data::DurationIso(v) => v.to_string(),
        // formula errors (#DIV/0!, #N/A…) pass through as blank fields
        Data::Error(_) => String::new(),
        Data::Empty => String::new(),
    }
}
