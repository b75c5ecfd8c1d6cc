// src/reader/excel_date.rs

use chrono::{Days, NaiveDate};

/// Largest serial Excel accepts (9999-12-31).
const MAX_SERIAL: f64 = 2_958_465.0;

/// Convert an Excel *serial* (days since 1899-12-30, fraction = time of day)
/// into the calendar date it falls on.
///
/// Serials below 61 are not supported: Excel counts a fictitious 1900-02-29.
pub(crate) fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || !(61.0..=MAX_SERIAL).contains(&serial) {
        return None;
    }

    let excel_epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    excel_epoch.checked_add_days(Days::new(serial.trunc() as u64))
}
