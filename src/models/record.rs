use super::weekday::{DayBucket, DayQuantities};
use chrono::NaiveDate;
use serde::Serialize;

/// One normalized inventory row, as stored in `inventory_temp` and exported.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub company_code: String,            // ⇔ IEMP
    pub support_date: Option<NaiveDate>, // ⇔ FSOPORT (None when unparseable)
    pub support_type: String,            // ⇔ ITDSOP
    pub sequence_number: i64,            // ⇔ INUMSOP, sort key
    pub inventory_id: String,            // ⇔ INVENTARIO
    pub resource_id: String,             // ⇔ IRECURSO
    pub cost_center: String,             // ⇔ ICCSUBCC
    pub labor_code: String,              // original ILABOR, never exported
    pub quantities: DayQuantities,       // ⇔ QCANTLUN … QCANTDOM
    pub observations: String,            // ⇔ SOBSERVAC
}

impl NormalizedRecord {
    /// Day bucket holding the quantity, if the quantity was placed.
    pub fn bucket(&self) -> Option<DayBucket> {
        self.quantities.bucket()
    }

    pub fn quantity(&self) -> f64 {
        self.quantities.total()
    }

    pub fn has_empty_labor(&self) -> bool {
        self.labor_code.trim().is_empty()
    }

    pub fn support_date_str(&self) -> String {
        self.support_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

/// Flat view of a record for the preview (JSON and table).
#[derive(Serialize, Clone, Debug)]
pub struct PreviewRow {
    pub sequence_number: i64,
    pub company_code: String,
    pub support_date: String,
    pub support_type: String,
    pub inventory_id: String,
    pub resource_id: String,
    pub cost_center: String,
    pub labor_code: String,
    pub quantity: f64,
    pub weekday: String,
    pub observations: String,
}

impl From<&NormalizedRecord> for PreviewRow {
    fn from(r: &NormalizedRecord) -> Self {
        Self {
            sequence_number: r.sequence_number,
            company_code: r.company_code.clone(),
            support_date: r.support_date_str(),
            support_type: r.support_type.clone(),
            inventory_id: r.inventory_id.clone(),
            resource_id: r.resource_id.clone(),
            cost_center: r.cost_center.clone(),
            labor_code: r.labor_code.clone(),
            quantity: r.quantity(),
            weekday: r.bucket().map(|b| b.label().to_string()).unwrap_or_default(),
            observations: r.observations.clone(),
        }
    }
}
