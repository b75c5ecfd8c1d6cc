use crate::cli::parser::Commands;
use crate::cli::response::{ImportResponse, print_json};
use crate::config::Config;
use crate::core::import::ImportLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::colors::{CYAN, RESET};
use crate::utils::format_quantity;
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config, json: bool) -> AppResult<()> {
    if let Commands::Import { file, kind } = cmd {
        let mut pool = DbPool::open(&cfg.database)?;
        let outcome = ImportLogic::import(&mut pool, cfg, Path::new(file), *kind)?;

        let message = format!("File processed: {} records imported", outcome.records);

        if json {
            return print_json(&ImportResponse {
                success: true,
                message,
                records: outcome.records,
                skipped: outcome.skipped(),
                unplaced: outcome.unplaced,
                statistics: outcome.statistics,
            });
        }

        success(&message);
        if outcome.skipped() > 0 {
            warning(format!("{} rows skipped", outcome.skipped()));
        }

        let s = &outcome.statistics;
        println!(
            "{}• Empty ILABOR:{} {}   {}• Cost centers:{} {}   {}• Total quantity:{} {}",
            CYAN,
            RESET,
            s.ilabor_vacios,
            CYAN,
            RESET,
            s.centros_costo_diferentes,
            CYAN,
            RESET,
            format_quantity(s.suma_cantidades)
        );
        println!("Run `rcontapyme preview` to inspect the batch, `rcontapyme export` to write the CSV.");
    }

    Ok(())
}
