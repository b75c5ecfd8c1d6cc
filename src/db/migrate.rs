use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. Migrations are recorded in it.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Temporary table holding the current batch.
fn create_inventory_temp(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS inventory_temp (
            sequence_number INTEGER PRIMARY KEY,
            company_code    TEXT NOT NULL DEFAULT '',
            support_date    TEXT,
            support_type    TEXT NOT NULL DEFAULT '',
            inventory_id    TEXT NOT NULL DEFAULT '',
            resource_id     TEXT NOT NULL DEFAULT '',
            cost_center     TEXT NOT NULL DEFAULT '',
            labor_code      TEXT NOT NULL DEFAULT '',
            qty_monday      REAL NOT NULL DEFAULT 0,
            qty_tuesday     REAL NOT NULL DEFAULT 0,
            qty_wednesday   REAL NOT NULL DEFAULT 0,
            qty_thursday    REAL NOT NULL DEFAULT 0,
            qty_friday      REAL NOT NULL DEFAULT 0,
            qty_saturday    REAL NOT NULL DEFAULT 0,
            qty_sunday      REAL NOT NULL DEFAULT 0,
            observations    TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_inventory_temp_cost_center
            ON inventory_temp(cost_center);
        "#,
    )?;
    Ok(())
}

/// Single-row metadata of the stored batch.
fn create_inventory_batch(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS inventory_batch (
            id           TEXT PRIMARY KEY,
            source_file  TEXT NOT NULL,
            created_at   TEXT NOT NULL,
            skipped_rows INTEGER NOT NULL DEFAULT 0
        );
        "#,
    )?;
    Ok(())
}

type Migration = (&'static str, &'static str, fn(&Connection) -> Result<()>);

const MIGRATIONS: [Migration; 2] = [
    (
        "20250612_0001_create_inventory_temp",
        "Created inventory_temp table",
        create_inventory_temp,
    ),
    (
        "20250702_0002_create_inventory_batch",
        "Created inventory_batch table",
        create_inventory_batch,
    ),
];

/// Public entry point: run all pending migrations.
///
/// Called by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    for (version, message, apply) in MIGRATIONS {
        if is_applied(conn, version)? {
            continue;
        }

        apply(conn)?;
        mark_applied(conn, version, message)?;

        success(format!("Migration applied: {} → {}", version, message));
    }

    Ok(())
}
