use crate::config::Config;
use crate::core::redistribute::redistribute;
use crate::core::stats::compute_statistics;
use crate::db::log::ttlog_lenient;
use crate::db::pool::DbPool;
use crate::db::store;
use crate::errors::{AppError, AppResult, RowCoercionError};
use crate::models::{Batch, Statistics};
use crate::reader::{self, SourceFormat};
use crate::ui::messages::{info, warning};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct ImportOutcome {
    pub records: usize,
    pub rejected: Vec<RowCoercionError>,
    pub unplaced: usize,
    pub replaced: usize,
    pub statistics: Statistics,
    pub staged_path: PathBuf,
}

impl ImportOutcome {
    pub fn skipped(&self) -> usize {
        self.rejected.len()
    }
}

pub struct ImportLogic;

impl ImportLogic {
    /// Stage `file` in the uploads directory, parse and redistribute it, then
    /// replace the stored batch.
    ///
    /// The format is resolved before anything is staged. A parse error or a
    /// file without a single valid row leaves the previous batch in place.
    pub fn import(
        pool: &mut DbPool,
        cfg: &Config,
        file: &Path,
        kind: Option<SourceFormat>,
    ) -> AppResult<ImportOutcome> {
        let format = match kind {
            Some(k) => k,
            None => SourceFormat::from_path(file)?,
        };

        let read_opts = cfg.read_options()?;
        let norm_opts = cfg.normalize_options();

        let now = Local::now();
        let staged_path = stage_upload(file, &cfg.uploads_path(), now.timestamp_millis())?;
        info(format!("Reading {} file: {}", format.as_str(), file.display()));

        let rows = reader::open(&staged_path, format, &read_opts)?;
        let outcome = redistribute(rows, &norm_opts)?;

        for rej in &outcome.rejected {
            warning(format!("Skipped {}", rej));
        }

        if outcome.records.is_empty() {
            return Err(AppError::NoValidRows);
        }

        if outcome.unplaced > 0 {
            warning(format!(
                "{} records have an unreadable date: quantity left unassigned",
                outcome.unplaced
            ));
        }

        let previous = store::count(pool)?;
        if previous > 0 {
            warning(format!(
                "Replacing the current batch ({} records discarded)",
                previous
            ));
        }

        let source_name = file_name_of(file);
        let batch = Batch::stamped(
            now,
            &source_name,
            outcome.records,
            outcome.rejected.len(),
        );
        let inserted = store::replace_all(pool, &batch)?;

        ttlog_lenient(
            &pool.conn,
            "import",
            &source_name,
            &format!(
                "Imported {} records ({} skipped, {} unplaced)",
                inserted,
                outcome.rejected.len(),
                outcome.unplaced
            ),
        );

        Ok(ImportOutcome {
            records: inserted,
            statistics: compute_statistics(&batch.records),
            rejected: outcome.rejected,
            unplaced: outcome.unplaced,
            replaced: previous,
            staged_path,
        })
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Copy `file` into `uploads_dir` as `<millis>_<name>` and return the new path.
pub fn stage_upload(file: &Path, uploads_dir: &Path, millis: i64) -> AppResult<PathBuf> {
    if !file.is_file() {
        return Err(AppError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("input file not found: {}", file.display()),
        )));
    }

    fs::create_dir_all(uploads_dir)?;

    let staged = uploads_dir.join(format!("{}_{}", millis, file_name_of(file)));
    fs::copy(file, &staged)?;
    Ok(staged)
}
