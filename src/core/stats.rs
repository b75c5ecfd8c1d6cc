use crate::db::pool::DbPool;
use crate::db::store;
use crate::errors::AppResult;
use crate::models::{CostCenterCount, DayBucket, NormalizedRecord, Statistics};
use std::collections::{BTreeMap, HashSet};

/// Summary counts over `records`. An empty slice gives all zeros.
pub fn compute_statistics(records: &[NormalizedRecord]) -> Statistics {
    let mut stats = Statistics {
        total_registros: records.len(),
        ..Statistics::default()
    };

    let mut centers: HashSet<&str> = HashSet::new();

    for r in records {
        if r.has_empty_labor() {
            stats.ilabor_vacios += 1;
        }
        centers.insert(r.cost_center.as_str());
        stats.suma_cantidades += r.quantity();

        for day in DayBucket::ALL {
            if r.quantities.get(day) == 0.0 {
                continue;
            }
            match day {
                DayBucket::Monday => stats.registros_lunes += 1,
                DayBucket::Tuesday => stats.registros_martes += 1,
                DayBucket::Wednesday => stats.registros_miercoles += 1,
                DayBucket::Thursday => stats.registros_jueves += 1,
                DayBucket::Friday => stats.registros_viernes += 1,
                DayBucket::Saturday => stats.registros_sabado += 1,
                DayBucket::Sunday => stats.registros_domingo += 1,
            }
        }
    }

    stats.centros_costo_diferentes = centers.len();
    stats
}

/// Records per cost center, largest group first, ties by name.
pub fn cost_center_breakdown(records: &[NormalizedRecord]) -> Vec<CostCenterCount> {
    let mut groups: BTreeMap<&str, usize> = BTreeMap::new();
    for r in records {
        *groups.entry(r.cost_center.as_str()).or_insert(0) += 1;
    }

    let mut out: Vec<CostCenterCount> = groups
        .into_iter()
        .map(|(name, n)| CostCenterCount {
            centro_costo_asignado: name.to_string(),
            cantidad_registros: n,
        })
        .collect();

    // BTreeMap already yields names ascending; a stable sort keeps that for ties.
    out.sort_by(|a, b| b.cantidad_registros.cmp(&a.cantidad_registros));
    out
}

/// Everything the preview shows, read in one scan of the store.
#[derive(Debug)]
pub struct Snapshot {
    pub records: Vec<NormalizedRecord>,
    pub statistics: Statistics,
    pub breakdown: Vec<CostCenterCount>,
}

pub struct StatsLogic;

impl StatsLogic {
    pub fn snapshot(pool: &mut DbPool) -> AppResult<Snapshot> {
        let records = store::scan_ordered(pool)?;
        let statistics = compute_statistics(&records);
        let breakdown = cost_center_breakdown(&records);

        Ok(Snapshot {
            records,
            statistics,
            breakdown,
        })
    }
}
