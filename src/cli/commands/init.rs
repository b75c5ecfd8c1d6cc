use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log::ttlog_lenient;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the uploads directory
///  - the SQLite database and all pending migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let mut cfg = Config::init_all(cli.db.clone(), cli.test)?;

    if let Some(dir) = &cli.uploads {
        cfg.uploads_dir = dir.clone();
        std::fs::create_dir_all(cfg.uploads_path())?;
    }

    info("Initializing rContaPyme…");
    info(format!("Config file : {}", Config::config_file().display()));
    info(format!("Database    : {}", cfg.database));
    info(format!("Uploads     : {}", cfg.uploads_path().display()));

    let pool = DbPool::open(&cfg.database)?;

    ttlog_lenient(
        &pool.conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", cfg.database),
    );

    success("rContaPyme initialization completed!");
    Ok(())
}
