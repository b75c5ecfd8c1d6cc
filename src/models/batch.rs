use super::record::NormalizedRecord;
use chrono::{DateTime, Local};
use serde::Serialize;

/// One upload's worth of normalized records, from import to cleanup.
#[derive(Debug, Clone)]
pub struct Batch {
    pub info: BatchInfo,
    pub records: Vec<NormalizedRecord>,
}

/// Metadata stored alongside the records (`inventory_batch` table).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BatchInfo {
    pub id: String,
    pub source_file: String,
    pub created_at: String,
    pub skipped_rows: usize,
}

impl Batch {
    /// Build a batch stamped with the current local time.
    /// The id is the millisecond timestamp, the same prefix used for the staged upload.
    pub fn new(source_file: &str, records: Vec<NormalizedRecord>, skipped_rows: usize) -> Self {
        Self::stamped(Local::now(), source_file, records, skipped_rows)
    }

    pub fn stamped(
        now: DateTime<Local>,
        source_file: &str,
        records: Vec<NormalizedRecord>,
        skipped_rows: usize,
    ) -> Self {
        Self {
            info: BatchInfo {
                id: now.timestamp_millis().to_string(),
                source_file: source_file.to_string(),
                created_at: now.to_rfc3339(),
                skipped_rows,
            },
            records,
        }
    }
}
