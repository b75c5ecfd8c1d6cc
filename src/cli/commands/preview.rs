use crate::cli::parser::Commands;
use crate::cli::response::{PreviewResponse, print_json};
use crate::config::Config;
use crate::core::stats::{Snapshot, StatsLogic};
use crate::db::pool::DbPool;
use crate::db::store;
use crate::errors::AppResult;
use crate::models::{DayBucket, PreviewRow, Statistics};
use crate::ui::messages::{header, info};
use crate::utils::colors::{
    CYAN, GREY, RESET, YELLOW, color_for_optional_field, color_for_quantity, colorize_optional,
};
use crate::utils::format_quantity;
use crate::utils::formatting::truncate;
use crate::utils::table::{Column, Table};

const OBSERVATIONS_MAX: usize = 30;

pub fn handle(cmd: &Commands, cfg: &Config, json: bool) -> AppResult<()> {
    if let Commands::Preview { limit } = cmd {
        let mut pool = DbPool::open(&cfg.database)?;
        let snapshot = StatsLogic::snapshot(&mut pool)?;

        if json {
            let Snapshot {
                records,
                statistics,
                breakdown,
            } = snapshot;

            return print_json(&PreviewResponse {
                success: true,
                data: records.iter().map(PreviewRow::from).collect(),
                distribucion_centros_costo: breakdown,
                statistics,
            });
        }

        if snapshot.records.is_empty() {
            info("No batch loaded. Import a file with `rcontapyme import <FILE>`.");
            return Ok(());
        }

        if let Some(batch) = store::current_batch(&mut pool)? {
            header(format!(
                "Batch {} · {} · {}",
                batch.id, batch.source_file, batch.created_at
            ));
        }

        print_records(&snapshot, *limit);
        print_breakdown(&snapshot);
        print_statistics(&snapshot.statistics);
    }

    Ok(())
}

fn print_records(snapshot: &Snapshot, limit: Option<usize>) {
    let mut table = Table::new(vec![
        Column::new("INUMSOP"),
        Column::new("IEMP"),
        Column::new("FSOPORT"),
        Column::new("Día"),
        Column::new("ITDSOP"),
        Column::new("INVENTARIO"),
        Column::new("IRECURSO"),
        Column::new("ICCSUBCC"),
        Column::new("ILABOR"),
        Column::new("Cantidad"),
        Column::new("SOBSERVAC"),
    ]);

    let shown = limit.unwrap_or(snapshot.records.len());

    for r in snapshot.records.iter().take(shown) {
        let row = PreviewRow::from(r);
        let labor_color = color_for_optional_field(Some(&row.labor_code));

        table.add_row(vec![
            row.sequence_number.to_string(),
            row.company_code,
            colorize_optional(&row.support_date),
            colorize_optional(&row.weekday),
            row.support_type,
            row.inventory_id,
            row.resource_id,
            colorize_optional(&row.cost_center),
            format!("{labor_color}{}{RESET}", colorize_optional(&row.labor_code)),
            format!(
                "{}{}{RESET}",
                color_for_quantity(row.quantity),
                format_quantity(row.quantity)
            ),
            truncate(&row.observations, OBSERVATIONS_MAX),
        ]);
    }

    print!("{}", table.render());

    if shown < snapshot.records.len() {
        println!(
            "{GREY}… {} more records not shown{RESET}",
            snapshot.records.len() - shown
        );
    }
    println!();
}

fn print_breakdown(snapshot: &Snapshot) {
    let mut table = Table::new(vec![Column::new("Centro de costo"), Column::new("Registros")]);

    for c in &snapshot.breakdown {
        table.add_row(vec![
            colorize_optional(&c.centro_costo_asignado),
            c.cantidad_registros.to_string(),
        ]);
    }

    println!("{CYAN}Distribución por centro de costo{RESET}");
    print!("{}", table.render());
    println!();
}

fn print_statistics(s: &Statistics) {
    println!("{CYAN}Estadísticas{RESET}");
    println!("  Total registros:          {YELLOW}{}{RESET}", s.total_registros);
    println!("  ILABOR vacíos:            {}", s.ilabor_vacios);
    println!("  Centros de costo:         {}", s.centros_costo_diferentes);
    println!(
        "  Suma de cantidades:       {}",
        format_quantity(s.suma_cantidades)
    );

    let per_day = [
        s.registros_lunes,
        s.registros_martes,
        s.registros_miercoles,
        s.registros_jueves,
        s.registros_viernes,
        s.registros_sabado,
        s.registros_domingo,
    ];
    for (day, n) in DayBucket::ALL.iter().zip(per_day) {
        println!("  {:<10} ({}): {}", day.label(), day.column(), n);
    }
}
