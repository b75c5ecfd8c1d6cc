use crate::config::Config;
use crate::core::cleanup::{CleanupLogic, CleanupReport};
use crate::db::log::ttlog_lenient;
use crate::db::pool::DbPool;
use crate::db::store;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::{ensure_parent_dir, ensure_writable};
use crate::export::{default_file_name, notify_export_success, render_contapyme_csv};
use crate::ui::messages::info;
use crate::utils::path::expand_tilde;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Where the export goes: an explicit file, or a generated name in a directory.
#[derive(Debug, Clone)]
pub enum ExportTarget {
    File(PathBuf),
    Dir(PathBuf),
}

impl ExportTarget {
    pub fn from_args(file: &Option<String>, dir: &Option<String>, cfg: &Config) -> Self {
        match (file, dir) {
            (Some(f), _) => ExportTarget::File(PathBuf::from(f)),
            (None, Some(d)) => ExportTarget::Dir(expand_tilde(d)),
            (None, None) => ExportTarget::Dir(cfg.export_path()),
        }
    }

    fn resolve(&self) -> PathBuf {
        match self {
            ExportTarget::File(p) => p.clone(),
            ExportTarget::Dir(d) => d.join(default_file_name(Local::now())),
        }
    }
}

#[derive(Debug)]
pub struct ExportOutcome {
    pub file: PathBuf,
    pub records: usize,
    pub cleanup: CleanupReport,
}

pub struct ExportLogic;

impl ExportLogic {
    /// Write the ContaPyme CSV for the stored batch, then run the automatic cleanup.
    ///
    /// Nothing is created on disk when the store is empty. Without `interactive`
    /// an existing file is never overwritten unless `force` is set.
    pub fn export(
        pool: &mut DbPool,
        target: &ExportTarget,
        uploads_dir: &Path,
        force: bool,
        interactive: bool,
    ) -> AppResult<ExportOutcome> {
        let records = store::scan_ordered(pool)?;
        if records.is_empty() {
            return Err(AppError::EmptyBatch);
        }

        let bytes = render_contapyme_csv(&records)?;

        let path = target.resolve();
        ensure_writable(&path, force, interactive)?;
        ensure_parent_dir(&path)?;

        info(format!("Exporting to CSV: {}", path.display()));
        fs::write(&path, &bytes)
            .map_err(|e| AppError::Export(format!("{}: {}", path.display(), e)))?;

        notify_export_success(records.len(), &path);
        ttlog_lenient(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!("Exported {} records", records.len()),
        );

        let cleanup = CleanupLogic::run_after_export(pool, uploads_dir, &path);

        Ok(ExportOutcome {
            file: path,
            records: records.len(),
            cleanup,
        })
    }
}
