use crate::db::pool::DbPool;
use crate::db::store;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) CURRENT BATCH
    //
    let count = store::count(pool)?;
    println!(
        "{}• Records in temporary table:{} {}{}{}",
        CYAN, RESET, GREEN, count, RESET
    );

    match store::current_batch(pool)? {
        Some(batch) => {
            println!("{}• Current batch:{}", CYAN, RESET);
            println!("    id:       {}", batch.id);
            println!("    source:   {}", batch.source_file);
            println!("    imported: {}", batch.created_at);
            println!("    skipped:  {}", batch.skipped_rows);
        }
        None => println!("{}• Current batch:{} {GREY}--{RESET}", CYAN, RESET),
    }

    //
    // 3) LAST EXPORT
    //
    let last_export: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM log WHERE operation = 'export' ORDER BY id DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_last = last_export.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    println!("{}• Last export:{} {}", CYAN, RESET, fmt_last);

    println!();
    Ok(())
}
