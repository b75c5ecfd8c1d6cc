use crate::cli::parser::Commands;
use crate::cli::response::{ExportResponse, print_json};
use crate::config::Config;
use crate::core::export::{ExportLogic, ExportTarget};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, warning};

pub fn handle(cmd: &Commands, cfg: &Config, json: bool) -> AppResult<()> {
    if let Commands::Export { file, dir, force } = cmd {
        let mut pool = DbPool::open(&cfg.database)?;
        let target = ExportTarget::from_args(file, dir, cfg);

        let outcome = ExportLogic::export(&mut pool, &target, &cfg.uploads_path(), *force, !json)?;

        let message = format!("CSV generated with {} records", outcome.records);

        if json {
            return print_json(&ExportResponse {
                success: true,
                message,
                file: outcome.file.to_string_lossy().to_string(),
                records: outcome.records,
                archivos_eliminados: outcome.cleanup.archivos_eliminados,
                registros_eliminados: outcome.cleanup.registros_eliminados,
            });
        }

        info(format!(
            "Automatic cleanup: {} records and {} uploaded files removed",
            outcome.cleanup.registros_eliminados, outcome.cleanup.archivos_eliminados
        ));
        if let Some(msg) = outcome.cleanup.message() {
            warning(format!("Cleanup was partial: {}", msg));
        }
    }

    Ok(())
}
