use serde::Serialize;

/// Summary counts over the stored batch.
/// Field names are the keys the web front end has always consumed.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct Statistics {
    pub total_registros: usize,
    pub ilabor_vacios: usize,
    pub centros_costo_diferentes: usize,
    pub suma_cantidades: f64,
    pub registros_lunes: usize,
    pub registros_martes: usize,
    pub registros_miercoles: usize,
    pub registros_jueves: usize,
    pub registros_viernes: usize,
    pub registros_sabado: usize,
    pub registros_domingo: usize,
}

/// Records per cost center.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct CostCenterCount {
    pub centro_costo_asignado: String,
    pub cantidad_registros: usize,
}
