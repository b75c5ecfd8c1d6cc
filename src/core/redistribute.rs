//! Day-bucket redistribution: one raw row → one normalized record whose
//! quantity sits in the weekday column of its support date.

use crate::errors::{AppResult, RowCoercionError};
use crate::models::{DayBucket, DayQuantities, NormalizedRecord};
use crate::reader::{RawRow, serial_to_date};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashSet;

pub const COMPANY_CODE: &[&str] = &["iemp", "empresa", "codigo_empresa"];
pub const SUPPORT_DATE: &[&str] = &["fsoport", "fecha", "fecha_movimiento", "fecha_soporte"];
pub const SUPPORT_TYPE: &[&str] = &["itdsop", "tipo_soporte", "tipo_documento"];
pub const SEQUENCE_NUMBER: &[&str] = &["inumsop", "numero", "numero_soporte", "consecutivo"];
pub const INVENTORY_ID: &[&str] = &["inventario", "codigo_elemento", "elemento", "codigo"];
pub const RESOURCE_ID: &[&str] = &[
    "irecurso",
    "recurso",
    "categoria",
    "categoria_descripcion",
];
pub const COST_CENTER: &[&str] = &[
    "iccsubcc",
    "centro_costo_asignado",
    "centro_costo",
    "centro_de_costo",
];
pub const LABOR_CODE: &[&str] = &["ilabor", "labor", "labor_original"];
pub const QUANTITY: &[&str] = &["cantidad", "qcant", "quantity", "qty"];
pub const OBSERVATIONS: &[&str] = &["sobservac", "observaciones", "observacion"];

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
];

/// Knobs taken from the configuration.
#[derive(Clone, Debug)]
pub struct NormalizeOptions {
    pub date_formats: Vec<String>,
    pub default_company_code: Option<String>,
    pub default_support_type: Option<String>,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            date_formats: default_date_formats(),
            default_company_code: None,
            default_support_type: None,
        }
    }
}

pub fn default_date_formats() -> Vec<String> {
    ["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d", "%d-%m-%Y"]
        .iter()
        .map(|f| f.to_string())
        .collect()
}

/// Outcome of redistributing a whole file.
#[derive(Debug, Default)]
pub struct Redistribution {
    pub records: Vec<NormalizedRecord>,
    pub rejected: Vec<RowCoercionError>,
    /// Records kept with all seven day fields at zero because the date was unreadable.
    pub unplaced: usize,
}

/// Consume the parser output. A parse error aborts; a bad row is only collected.
/// Of two rows with the same sequence number the first one wins.
pub fn redistribute<I>(rows: I, opts: &NormalizeOptions) -> AppResult<Redistribution>
where
    I: IntoIterator<Item = AppResult<RawRow>>,
{
    let mut out = Redistribution::default();
    let mut seen: HashSet<i64> = HashSet::new();

    for row in rows {
        let row = row?;

        match normalize_row(&row, opts) {
            Ok(record) => {
                if !seen.insert(record.sequence_number) {
                    out.rejected.push(RowCoercionError {
                        line: row.line,
                        value: record.sequence_number.to_string(),
                        reason: "duplicate sequence number in this file".to_string(),
                    });
                    continue;
                }
                if record.support_date.is_none() {
                    out.unplaced += 1;
                }
                out.records.push(record);
            }
            Err(e) => out.rejected.push(e),
        }
    }

    Ok(out)
}

/// Map one raw row to a normalized record.
pub fn normalize_row(
    row: &RawRow,
    opts: &NormalizeOptions,
) -> Result<NormalizedRecord, RowCoercionError> {
    let raw_seq = row.first_of(SEQUENCE_NUMBER);
    let sequence_number = coerce_sequence(raw_seq).map_err(|reason| RowCoercionError {
        line: row.line,
        value: raw_seq.to_string(),
        reason,
    })?;

    let support_date = parse_support_date(row.first_of(SUPPORT_DATE), &opts.date_formats);
    let bucket = support_date.map(DayBucket::from_date);
    let quantity = parse_quantity(row.first_of(QUANTITY));

    Ok(NormalizedRecord {
        company_code: or_default(row.first_of(COMPANY_CODE), &opts.default_company_code),
        support_date,
        support_type: or_default(row.first_of(SUPPORT_TYPE), &opts.default_support_type),
        sequence_number,
        inventory_id: row.first_of(INVENTORY_ID).to_string(),
        resource_id: row.first_of(RESOURCE_ID).to_string(),
        cost_center: row.first_of(COST_CENTER).to_string(),
        labor_code: row.first_of(LABOR_CODE).to_string(),
        quantities: DayQuantities::placed(bucket, quantity),
        observations: row.first_of(OBSERVATIONS).to_string(),
    })
}

fn or_default(value: &str, fallback: &Option<String>) -> String {
    match fallback {
        Some(f) if value.is_empty() => f.clone(),
        _ => value.to_string(),
    }
}

/// Integer text as is, fractional numeric text truncated toward zero,
/// anything else rejected.
pub fn coerce_sequence(raw: &str) -> Result<i64, String> {
    let s = raw.trim();
    if s.is_empty() {
        return Err("empty sequence number".to_string());
    }

    if let Ok(v) = s.parse::<i64>() {
        return Ok(v);
    }

    match s.parse::<f64>() {
        Ok(v) if v.is_finite() && v.abs() < i64::MAX as f64 => Ok(v.trunc() as i64),
        _ => Err("sequence number is not numeric".to_string()),
    }
}

/// Decimal quantity; missing or unreadable text is zero.
/// A lone `,` is a decimal separator. With both `,` and `.` the one that comes
/// last is the decimal point and the other groups thousands.
pub fn parse_quantity(raw: &str) -> f64 {
    let mut s: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    match (s.rfind(','), s.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => s = s.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => s = s.replace(',', ""),
        (Some(_), None) => s = s.replace(',', "."),
        _ => {}
    }

    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Try the configured date formats, then datetime forms, then an Excel serial.
pub fn parse_support_date(raw: &str, formats: &[String]) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    for fmt in DATETIME_FORMATS.iter() {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    s.parse::<f64>().ok().and_then(serial_to_date)
}
