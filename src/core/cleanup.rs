//! Cleanup of a batch: store rows and staged uploads, each part best-effort.

use crate::db::log::ttlog_lenient;
use crate::db::pool::DbPool;
use crate::db::store;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;

/// Staged uploads are named `<digits>_<original name>`.
pub const UPLOAD_PATTERN: &str = r"^\d+_";

/// Which part of a cleanup went wrong, and why.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CleanupFailure {
    pub part: &'static str,
    pub reason: String,
}

/// Counts for whichever parts succeeded, plus the failures that were logged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CleanupReport {
    pub registros_eliminados: usize,
    pub archivos_eliminados: usize,
    #[serde(skip)]
    pub failures: Vec<CleanupFailure>,
}

impl CleanupReport {
    /// A cleanup fails only when neither part could run.
    pub fn success(&self) -> bool {
        self.failures.len() < 2
    }

    pub fn message(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        Some(
            self.failures
                .iter()
                .map(|f| format!("{}: {}", f.part, f.reason))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

pub struct CleanupLogic;

impl CleanupLogic {
    /// Clear the store, then purge staged uploads. Neither part can stop the other.
    /// `trigger` is recorded in the internal log ("manual" or "export").
    pub fn run(pool: Option<&mut DbPool>, uploads_dir: &Path, trigger: &str) -> CleanupReport {
        Self::run_sparing(pool, uploads_dir, trigger, None)
    }

    /// Automatic cleanup after an export. `exported` survives even when it was
    /// written into the uploads directory under a staged-looking name.
    pub fn run_after_export(
        pool: &mut DbPool,
        uploads_dir: &Path,
        exported: &Path,
    ) -> CleanupReport {
        Self::run_sparing(Some(pool), uploads_dir, "export", Some(exported))
    }

    fn run_sparing(
        pool: Option<&mut DbPool>,
        uploads_dir: &Path,
        trigger: &str,
        keep: Option<&Path>,
    ) -> CleanupReport {
        let mut report = CleanupReport::default();

        match pool {
            Some(pool) => {
                match store::clear(pool) {
                    Ok(n) => report.registros_eliminados = n,
                    Err(e) => report.failures.push(CleanupFailure {
                        part: "records",
                        reason: e.to_string(),
                    }),
                }

                match purge_uploads_except(uploads_dir, keep) {
                    Ok(n) => report.archivos_eliminados = n,
                    Err(e) => report.failures.push(CleanupFailure {
                        part: "uploads",
                        reason: e.to_string(),
                    }),
                }

                for f in &report.failures {
                    warning(format!("Cleanup of {} failed: {}", f.part, f.reason));
                    ttlog_lenient(&pool.conn, "cleanup_failed", f.part, &f.reason);
                }

                ttlog_lenient(
                    &pool.conn,
                    "cleanup",
                    trigger,
                    &format!(
                        "Removed {} records and {} uploaded files",
                        report.registros_eliminados, report.archivos_eliminados
                    ),
                );
            }
            None => {
                report.failures.push(CleanupFailure {
                    part: "records",
                    reason: "database not reachable".to_string(),
                });
                warning("Cleanup of records failed: database not reachable");

                match purge_uploads_except(uploads_dir, keep) {
                    Ok(n) => report.archivos_eliminados = n,
                    Err(e) => {
                        warning(format!("Cleanup of uploads failed: {}", e));
                        report.failures.push(CleanupFailure {
                            part: "uploads",
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        report
    }
}

/// Remove regular files in `dir` whose name matches `UPLOAD_PATTERN`.
/// A missing directory is zero files; a file that cannot be removed is
/// reported and not counted.
pub fn purge_uploads(dir: &Path) -> AppResult<usize> {
    purge_uploads_except(dir, None)
}

/// Same as [`purge_uploads`], leaving `keep` in place.
pub fn purge_uploads_except(dir: &Path, keep: Option<&Path>) -> AppResult<usize> {
    let keep = keep.and_then(|p| fs::canonicalize(p).ok());

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e.into()),
    };

    let re = Regex::new(UPLOAD_PATTERN).map_err(|e| AppError::Other(e.to_string()))?;

    let mut removed = 0;
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();

        if !re.is_match(&name) || !entry.file_type()?.is_file() {
            continue;
        }
        if let Some(keep) = &keep
            && fs::canonicalize(entry.path()).ok().as_ref() == Some(keep)
        {
            continue;
        }

        match fs::remove_file(entry.path()) {
            Ok(()) => removed += 1,
            Err(e) => warning(format!("Could not remove '{}': {}", name, e)),
        }
    }

    Ok(removed)
}
