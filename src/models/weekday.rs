use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// One of the seven mutually exclusive weekday slots a quantity can land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum DayBucket {
    Monday,    // QCANTLUN
    Tuesday,   // QCANTMAR
    Wednesday, // QCANTMIE
    Thursday,  // QCANTJUE
    Friday,    // QCANTVIE
    Saturday,  // QCANTSAB
    Sunday,    // QCANTDOM
}

impl DayBucket {
    pub const ALL: [DayBucket; 7] = [
        DayBucket::Monday,
        DayBucket::Tuesday,
        DayBucket::Wednesday,
        DayBucket::Thursday,
        DayBucket::Friday,
        DayBucket::Saturday,
        DayBucket::Sunday,
    ];

    /// Bucket of a calendar date, by ISO weekday.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::from_iso(date.weekday().number_from_monday()).unwrap_or(DayBucket::Monday)
    }

    /// ISO index: Monday = 1 … Sunday = 7.
    pub fn from_iso(index: u32) -> Option<Self> {
        match index {
            1..=7 => Some(Self::ALL[(index - 1) as usize]),
            _ => None,
        }
    }

    /// Zero-based position inside a seven-slot array.
    pub fn slot(&self) -> usize {
        match self {
            DayBucket::Monday => 0,
            DayBucket::Tuesday => 1,
            DayBucket::Wednesday => 2,
            DayBucket::Thursday => 3,
            DayBucket::Friday => 4,
            DayBucket::Saturday => 5,
            DayBucket::Sunday => 6,
        }
    }

    /// ContaPyme quantity column for this day.
    pub fn column(&self) -> &'static str {
        match self {
            DayBucket::Monday => "QCANTLUN",
            DayBucket::Tuesday => "QCANTMAR",
            DayBucket::Wednesday => "QCANTMIE",
            DayBucket::Thursday => "QCANTJUE",
            DayBucket::Friday => "QCANTVIE",
            DayBucket::Saturday => "QCANTSAB",
            DayBucket::Sunday => "QCANTDOM",
        }
    }

    /// Spanish weekday name shown in the preview.
    pub fn label(&self) -> &'static str {
        match self {
            DayBucket::Monday => "Lunes",
            DayBucket::Tuesday => "Martes",
            DayBucket::Wednesday => "Miércoles",
            DayBucket::Thursday => "Jueves",
            DayBucket::Friday => "Viernes",
            DayBucket::Saturday => "Sábado",
            DayBucket::Sunday => "Domingo",
        }
    }
}

/// The seven day-quantity fields of a record.
/// At most one slot is non-zero once built through `placed`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DayQuantities([f64; 7]);

impl DayQuantities {
    /// Place `quantity` in the slot of `bucket`. Non-positive quantities stay unplaced.
    pub fn placed(bucket: Option<DayBucket>, quantity: f64) -> Self {
        let mut slots = [0.0; 7];
        if let Some(b) = bucket
            && quantity > 0.0
        {
            slots[b.slot()] = quantity;
        }
        Self(slots)
    }

    /// Rebuild from stored columns (Monday first).
    pub fn from_slots(slots: [f64; 7]) -> Self {
        Self(slots)
    }

    pub fn get(&self, bucket: DayBucket) -> f64 {
        self.0[bucket.slot()]
    }

    pub fn slots(&self) -> &[f64; 7] {
        &self.0
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// The day carrying a non-zero quantity, if any.
    pub fn bucket(&self) -> Option<DayBucket> {
        DayBucket::ALL.into_iter().find(|b| self.get(*b) != 0.0)
    }
}
