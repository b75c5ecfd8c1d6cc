#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use rcontapyme::db::pool::DbPool;
use rcontapyme::models::{DayBucket, DayQuantities, NormalizedRecord};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rcp() -> Command {
    cargo_bin_cmd!("rcontapyme")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rcontapyme.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Fresh, empty directory inside tempdir
pub fn temp_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rcontapyme_dir", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp dir");
    path
}

/// Write `content` as an input file inside tempdir and return its path
pub fn write_input(name: &str, file_name: &str, content: &[u8]) -> String {
    let dir = temp_dir(&format!("{}_input", name));
    let path = dir.join(file_name);
    fs::write(&path, content).expect("write input file");
    path.to_string_lossy().to_string()
}

/// Three rows on a Monday, a Wednesday and a Sunday (5, 7 and 2 units).
pub const SAMPLE_CSV: &str = "\
IEMP,FSOPORT,ITDSOP,INUMSOP,INVENTARIO,IRECURSO,ICCSUBCC,ILABOR,CANTIDAD,SOBSERVAC
001,2025-06-11,IN,20,ELEM-2,REC-B,CC200,LAB1,7,segunda
001,2025-06-09,IN,10,ELEM-1,REC-A,CC100,,5,primera
001,2025-06-15,IN,30,ELEM-3,REC-C,CC100,,2,\"tercera, con coma\"
";

/// Initialize the DB through the CLI (test mode: no config file written)
pub fn init_db(db_path: &str, uploads: &str) {
    rcp()
        .args(["--db", db_path, "--uploads", uploads, "--test", "init"])
        .assert()
        .success();
}

/// Open (and migrate) a database directly through the library
pub fn open_pool(db_path: &str) -> DbPool {
    DbPool::open(db_path).expect("open db")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Record with the quantity placed on the weekday of `support_date`
pub fn record(seq: i64, support_date: NaiveDate, qty: f64, cost_center: &str) -> NormalizedRecord {
    NormalizedRecord {
        company_code: "001".to_string(),
        support_date: Some(support_date),
        support_type: "IN".to_string(),
        sequence_number: seq,
        inventory_id: format!("ELEM-{seq}"),
        resource_id: "REC".to_string(),
        cost_center: cost_center.to_string(),
        labor_code: String::new(),
        quantities: DayQuantities::placed(Some(DayBucket::from_date(support_date)), qty),
        observations: String::new(),
    }
}
