//! Temporary store: the `inventory_temp` table holds exactly one batch.
//! Writes are single transactions, so readers never see a half-replaced
//! or half-cleared batch.

use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::{Batch, BatchInfo, DayQuantities, NormalizedRecord};
use chrono::NaiveDate;
use rusqlite::{OptionalExtension, Row, params};

const SELECT_RECORDS: &str = "SELECT sequence_number, company_code, support_date, support_type,
        inventory_id, resource_id, cost_center, labor_code,
        qty_monday, qty_tuesday, qty_wednesday, qty_thursday,
        qty_friday, qty_saturday, qty_sunday, observations
 FROM inventory_temp
 ORDER BY sequence_number ASC";

/// Discard the stored batch (if any) and insert `batch`. Returns the rows inserted.
pub fn replace_all(pool: &mut DbPool, batch: &Batch) -> AppResult<usize> {
    let inserted = pool.with_conn(|conn| {
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM inventory_temp", [])?;
        tx.execute("DELETE FROM inventory_batch", [])?;

        tx.execute(
            "INSERT INTO inventory_batch (id, source_file, created_at, skipped_rows)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                batch.info.id,
                batch.info.source_file,
                batch.info.created_at,
                batch.info.skipped_rows as i64
            ],
        )?;

        let mut inserted = 0;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO inventory_temp (
                    sequence_number, company_code, support_date, support_type,
                    inventory_id, resource_id, cost_center, labor_code,
                    qty_monday, qty_tuesday, qty_wednesday, qty_thursday,
                    qty_friday, qty_saturday, qty_sunday, observations
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
            )?;

            for r in &batch.records {
                let q = r.quantities.slots();
                let date = r.support_date.map(|d| d.format("%Y-%m-%d").to_string());

                inserted += stmt.execute(params![
                    r.sequence_number,
                    r.company_code,
                    date,
                    r.support_type,
                    r.inventory_id,
                    r.resource_id,
                    r.cost_center,
                    r.labor_code,
                    q[0],
                    q[1],
                    q[2],
                    q[3],
                    q[4],
                    q[5],
                    q[6],
                    r.observations,
                ])?;
            }
        }

        tx.commit()?;
        Ok(inserted)
    })?;

    Ok(inserted)
}

/// All records, ascending by sequence number.
pub fn scan_ordered(pool: &mut DbPool) -> AppResult<Vec<NormalizedRecord>> {
    let mut stmt = pool.conn.prepare(SELECT_RECORDS)?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count(pool: &mut DbPool) -> AppResult<usize> {
    let n: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM inventory_temp", [], |row| row.get(0))?;
    Ok(n as usize)
}

/// Delete every record and the batch metadata. Returns the records removed (0 when empty).
pub fn clear(pool: &mut DbPool) -> AppResult<usize> {
    let removed = pool.with_conn(|conn| {
        let tx = conn.transaction()?;
        let removed = tx.execute("DELETE FROM inventory_temp", [])?;
        tx.execute("DELETE FROM inventory_batch", [])?;
        tx.commit()?;
        Ok(removed)
    })?;

    Ok(removed)
}

/// Metadata of the stored batch, if one is stored.
pub fn current_batch(pool: &mut DbPool) -> AppResult<Option<BatchInfo>> {
    let info = pool
        .conn
        .query_row(
            "SELECT id, source_file, created_at, skipped_rows FROM inventory_batch LIMIT 1",
            [],
            |row| {
                Ok(BatchInfo {
                    id: row.get(0)?,
                    source_file: row.get(1)?,
                    created_at: row.get(2)?,
                    skipped_rows: row.get::<_, i64>(3)? as usize,
                })
            },
        )
        .optional()?;

    Ok(info)
}

/// Mapping DB → NormalizedRecord.
fn map_row(row: &Row<'_>) -> rusqlite::Result<NormalizedRecord> {
    let date_str: Option<String> = row.get(2)?;
    let support_date = match date_str {
        Some(s) => Some(NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                2,
                rusqlite::types::Type::Text,
                Box::new(AppError::Other(format!("Invalid stored date: {}", s))),
            )
        })?),
        None => None,
    };

    Ok(NormalizedRecord {
        sequence_number: row.get(0)?,
        company_code: row.get(1)?,
        support_date,
        support_type: row.get(3)?,
        inventory_id: row.get(4)?,
        resource_id: row.get(5)?,
        cost_center: row.get(6)?,
        labor_code: row.get(7)?,
        quantities: DayQuantities::from_slots([
            row.get(8)?,
            row.get(9)?,
            row.get(10)?,
            row.get(11)?,
            row.get(12)?,
            row.get(13)?,
            row.get(14)?,
        ]),
        observations: row.get(15)?,
    })
}
