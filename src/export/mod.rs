// src/export/mod.rs

mod contapyme;
pub(crate) mod fs_utils;
mod model;

pub use contapyme::{render_contapyme_csv, write_contapyme_csv};
pub use model::HEADERS;

use crate::ui::messages::success;
use chrono::{DateTime, Local};
use std::path::Path;

/// Common completion message for exports.
pub(crate) fn notify_export_success(records: usize, path: &Path) {
    success(format!(
        "ContaPyme export completed: {} records → {}",
        records,
        path.display()
    ));
}

/// `contapyme_<YYYY-mm-dd_HH-MM-SS>.csv`
pub fn default_file_name(now: DateTime<Local>) -> String {
    format!("contapyme_{}.csv", now.format("%Y-%m-%d_%H-%M-%S"))
}
