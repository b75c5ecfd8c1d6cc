// src/export/model.rs

use crate::models::{DayBucket, NormalizedRecord};
use crate::utils::format_quantity;

/// ContaPyme import header, in file order.
pub const HEADERS: [&str; 16] = [
    "IEMP",
    "FSOPORT",
    "ITDSOP",
    "INUMSOP",
    "INVENTARIO",
    "IRECURSO",
    "ICCSUBCC",
    "ILABOR",
    "QCANTLUN",
    "QCANTMAR",
    "QCANTMIE",
    "QCANTJUE",
    "QCANTVIE",
    "QCANTSAB",
    "QCANTDOM",
    "SOBSERVAC",
];

/// One record as the 16 ContaPyme fields.
///
/// Only the Monday quantity is carried (`QCANTLUN`); the other six day
/// columns and `ILABOR` are always written empty.
pub(crate) fn record_to_row(r: &NormalizedRecord) -> [String; 16] {
    let monday = r.quantities.get(DayBucket::Monday);
    let qcantlun = if monday == 0.0 {
        String::new()
    } else {
        format_quantity(monday)
    };

    [
        r.company_code.clone(),
        r.support_date_str(),
        r.support_type.clone(),
        r.sequence_number.to_string(),
        r.inventory_id.clone(),
        r.resource_id.clone(),
        r.cost_center.clone(),
        String::new(),
        qcantlun,
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        r.observations.clone(),
    ]
}
