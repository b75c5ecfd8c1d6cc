use crate::cli::parser::Commands;
use crate::cli::response::{CleanupResponse, print_json};
use crate::config::Config;
use crate::core::cleanup::CleanupLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};

/// Manual cleanup. A database that cannot be opened still lets the uploads be purged.
pub fn handle(cmd: &Commands, cfg: &Config, json: bool) -> AppResult<()> {
    if let Commands::Cleanup = cmd {
        let mut pool = match DbPool::open(&cfg.database) {
            Ok(p) => Some(p),
            Err(e) => {
                warning(format!("Database not available: {}", e));
                None
            }
        };

        let report = CleanupLogic::run(pool.as_mut(), &cfg.uploads_path(), "manual");

        if json {
            return print_json(&CleanupResponse {
                success: report.success(),
                archivos_eliminados: report.archivos_eliminados,
                registros_eliminados: report.registros_eliminados,
                message: report.message(),
            });
        }

        if !report.success() {
            return Err(AppError::Other(format!(
                "cleanup failed: {}",
                report.message().unwrap_or_default()
            )));
        }

        success(format!(
            "Cleanup completed: {} records and {} uploaded files removed",
            report.registros_eliminados, report.archivos_eliminados
        ));
    }

    Ok(())
}
