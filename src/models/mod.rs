pub mod batch;
pub mod record;
pub mod statistics;
pub mod weekday;

pub use batch::{Batch, BatchInfo};
pub use record::{NormalizedRecord, PreviewRow};
pub use statistics::{CostCenterCount, Statistics};
pub use weekday::{DayBucket, DayQuantities};
