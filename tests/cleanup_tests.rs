mod common;
use common::{date, open_pool, rcp, record, setup_test_db, temp_dir};
use rcontapyme::core::cleanup::{CleanupLogic, purge_uploads};
use rcontapyme::db::store;
use rcontapyme::models::Batch;
use std::fs;

#[test]
fn test_manual_cleanup_removes_rows_and_staged_uploads() {
    let db_path = setup_test_db("cleanup_manual");
    let mut pool = open_pool(&db_path);

    let batch = Batch::new(
        "inventario.csv",
        vec![
            record(1, date(2025, 6, 9), 5.0, "CC1"),
            record(2, date(2025, 6, 11), 7.0, "CC2"),
            record(3, date(2025, 6, 15), 2.0, "CC1"),
        ],
        0,
    );
    store::replace_all(&mut pool, &batch).expect("replace");

    let uploads = temp_dir("cleanup_manual_uploads");
    fs::write(uploads.join("1749456000000_inventario.csv"), "x").expect("write");
    fs::write(uploads.join("42_otro.xlsx"), "x").expect("write");
    fs::write(uploads.join("notas.txt"), "keep").expect("write");
    fs::create_dir_all(uploads.join("77_carpeta")).expect("mkdir");

    let report = CleanupLogic::run(Some(&mut pool), &uploads, "manual");

    assert!(report.success());
    assert!(report.failures.is_empty());
    assert_eq!(report.registros_eliminados, 3);
    assert_eq!(report.archivos_eliminados, 2);
    assert_eq!(store::count(&mut pool).expect("count"), 0);

    assert!(uploads.join("notas.txt").exists());
    assert!(uploads.join("77_carpeta").is_dir());

    // a second run has nothing left to remove
    let again = CleanupLogic::run(Some(&mut pool), &uploads, "manual");
    assert_eq!(again.registros_eliminados, 0);
    assert_eq!(again.archivos_eliminados, 0);
}

#[test]
fn test_missing_uploads_dir_counts_zero_and_rows_still_cleared() {
    let db_path = setup_test_db("cleanup_missing_uploads");
    let mut pool = open_pool(&db_path);

    let batch = Batch::new("x.csv", vec![record(1, date(2025, 6, 9), 1.0, "A")], 0);
    store::replace_all(&mut pool, &batch).expect("replace");

    let missing = temp_dir("cleanup_missing_uploads").join("does_not_exist");

    assert_eq!(purge_uploads(&missing).expect("purge"), 0);

    let report = CleanupLogic::run(Some(&mut pool), &missing, "manual");
    assert!(report.success());
    assert_eq!(report.registros_eliminados, 1);
    assert_eq!(report.archivos_eliminados, 0);
}

#[test]
fn test_uploads_are_purged_without_a_database() {
    let uploads = temp_dir("cleanup_no_db");
    fs::write(uploads.join("123_a.csv"), "x").expect("write");

    let report = CleanupLogic::run(None, &uploads, "manual");

    assert!(report.success());
    assert_eq!(report.archivos_eliminados, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].part, "records");
    assert!(report.message().is_some());
}

#[test]
fn test_cleanup_command_json() {
    let db_path = setup_test_db("cleanup_cli_json");
    let mut pool = open_pool(&db_path);
    let batch = Batch::new(
        "x.csv",
        vec![
            record(1, date(2025, 6, 9), 1.0, "A"),
            record(2, date(2025, 6, 10), 1.0, "A"),
        ],
        0,
    );
    store::replace_all(&mut pool, &batch).expect("replace");
    drop(pool);

    let uploads = temp_dir("cleanup_cli_json_uploads");
    fs::write(uploads.join("1_a.csv"), "x").expect("write");

    let output = rcp()
        .args([
            "--db",
            &db_path,
            "--uploads",
            &uploads.to_string_lossy(),
            "--json",
            "cleanup",
        ])
        .output()
        .expect("run cleanup");

    assert!(output.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json on stdout");
    assert_eq!(doc["success"], true);
    assert_eq!(doc["registros_eliminados"], 2);
    assert_eq!(doc["archivos_eliminados"], 1);
    assert!(doc.get("message").is_none());
}

#[test]
fn test_cleanup_after_export_spares_the_exported_file() {
    let db_path = setup_test_db("cleanup_spares_export");
    let mut pool = open_pool(&db_path);

    let batch = Batch::new("x.csv", vec![record(1, date(2025, 6, 9), 1.0, "A")], 0);
    store::replace_all(&mut pool, &batch).expect("replace");

    let uploads = temp_dir("cleanup_spares_export_uploads");
    fs::write(uploads.join("1749456000000_x.csv"), "x").expect("write");
    let exported = uploads.join("2025_cierre.csv");
    fs::write(&exported, "IEMP").expect("write");

    let report = CleanupLogic::run_after_export(&mut pool, &uploads, &exported);

    assert_eq!(report.registros_eliminados, 1);
    assert_eq!(report.archivos_eliminados, 1);
    assert!(exported.exists());
    assert!(!uploads.join("1749456000000_x.csv").exists());
}
