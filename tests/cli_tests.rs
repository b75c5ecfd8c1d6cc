use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;
use std::path::Path;

mod common;
use common::{SAMPLE_CSV, init_db, rcp, setup_test_db, temp_dir, temp_out, write_input};

fn json_of(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("JSON document on stdout")
}

#[test]
fn test_import_preview_export_flow() {
    let db_path = setup_test_db("cli_full_flow");
    let uploads = temp_dir("cli_full_flow_uploads");
    let uploads_s = uploads.to_string_lossy().to_string();
    init_db(&db_path, &uploads_s);

    let input = write_input("cli_full_flow", "inventario.csv", SAMPLE_CSV.as_bytes());

    // import
    let output = rcp()
        .args(["--db", &db_path, "--uploads", &uploads_s, "--json", "import", &input])
        .output()
        .expect("run import");
    assert!(output.status.success());

    let doc = json_of(&output);
    assert_eq!(doc["success"], true);
    assert_eq!(doc["records"], 3);
    assert_eq!(doc["skipped"], 0);
    assert_eq!(doc["statistics"]["registros_lunes"], 1);
    assert_eq!(doc["statistics"]["registros_miercoles"], 1);
    assert_eq!(doc["statistics"]["registros_domingo"], 1);
    assert_eq!(doc["statistics"]["suma_cantidades"], 14.0);
    assert_eq!(doc["statistics"]["ilabor_vacios"], 2);

    // the upload is staged as <millis>_<name>
    let staged: Vec<String> = fs::read_dir(&uploads)
        .expect("uploads dir")
        .map(|e| e.expect("entry").file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(staged.len(), 1);
    assert!(staged[0].ends_with("_inventario.csv"));

    // preview
    let output = rcp()
        .args(["--db", &db_path, "--json", "preview"])
        .output()
        .expect("run preview");
    assert!(output.status.success());

    let doc = json_of(&output);
    assert_eq!(doc["success"], true);
    let data = doc["data"].as_array().expect("data array");
    let seqs: Vec<i64> = data
        .iter()
        .map(|r| r["sequence_number"].as_i64().expect("seq"))
        .collect();
    assert_eq!(seqs, vec![10, 20, 30]);
    assert_eq!(data[0]["weekday"], "Lunes");
    assert_eq!(
        doc["distribucion_centros_costo"][0]["centro_costo_asignado"],
        "CC100"
    );
    assert_eq!(doc["distribucion_centros_costo"][0]["cantidad_registros"], 2);
    assert_eq!(doc["statistics"]["centros_costo_diferentes"], 2);

    // export
    let out = temp_out("cli_full_flow", "csv");
    let output = rcp()
        .args([
            "--db", &db_path, "--uploads", &uploads_s, "--json", "export", "--file", &out,
        ])
        .output()
        .expect("run export");
    assert!(output.status.success());

    let doc = json_of(&output);
    assert_eq!(doc["success"], true);
    assert_eq!(doc["records"], 3);
    assert_eq!(doc["registros_eliminados"], 3);
    assert_eq!(doc["archivos_eliminados"], 1);

    let bytes = fs::read(&out).expect("read export");
    assert!(bytes.starts_with(b"\xEF\xBB\xBF"));
    let text = String::from_utf8(bytes[3..].to_vec()).expect("utf-8");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[1], "001,2025-06-09,IN,10,ELEM-1,REC-A,CC100,,5,,,,,,,primera");
    assert_eq!(lines[2], "001,2025-06-11,IN,20,ELEM-2,REC-B,CC200,,,,,,,,,segunda");
    assert_eq!(
        lines[3],
        "001,2025-06-15,IN,30,ELEM-3,REC-C,CC100,,,,,,,,,\"tercera, con coma\""
    );

    // the automatic cleanup emptied the batch and the uploads
    assert_eq!(fs::read_dir(&uploads).expect("uploads dir").count(), 0);
    rcp()
        .args(["--db", &db_path, "export", "--file", &temp_out("cli_full_flow_2", "csv")])
        .assert()
        .failure()
        .stderr(contains("No processed data to export"));
}

#[test]
fn test_import_skips_bad_sequence_rows() {
    let db_path = setup_test_db("cli_bad_sequence");
    let uploads = temp_dir("cli_bad_sequence_uploads");
    let uploads_s = uploads.to_string_lossy().to_string();
    init_db(&db_path, &uploads_s);

    let content = "INUMSOP,FSOPORT,CANTIDAD\n1,2025-06-09,5\nABC,2025-06-10,6\n3,2025-06-11,7\n";
    let input = write_input("cli_bad_sequence", "inv.csv", content.as_bytes());

    let output = rcp()
        .args(["--db", &db_path, "--uploads", &uploads_s, "--json", "import", &input])
        .output()
        .expect("run import");
    assert!(output.status.success());

    let doc = json_of(&output);
    assert_eq!(doc["records"], 2);
    assert_eq!(doc["skipped"], 1);
    assert!(String::from_utf8_lossy(&output.stderr).contains("ABC"));
}

#[test]
fn test_import_unsupported_extension_stages_nothing() {
    let db_path = setup_test_db("cli_unsupported");
    let uploads = temp_dir("cli_unsupported_uploads");
    let uploads_s = uploads.to_string_lossy().to_string();
    init_db(&db_path, &uploads_s);

    let input = write_input("cli_unsupported", "inventario.txt", b"a,b\n1,2\n");

    rcp()
        .args(["--db", &db_path, "--uploads", &uploads_s, "import", &input])
        .assert()
        .failure()
        .stderr(contains("Unsupported file format 'txt'"));

    assert_eq!(fs::read_dir(&uploads).expect("uploads dir").count(), 0);
}

#[test]
fn test_import_without_valid_rows_keeps_previous_batch() {
    let db_path = setup_test_db("cli_no_valid_rows");
    let uploads = temp_dir("cli_no_valid_rows_uploads");
    let uploads_s = uploads.to_string_lossy().to_string();
    init_db(&db_path, &uploads_s);

    let good = write_input("cli_no_valid_rows_good", "inv.csv", SAMPLE_CSV.as_bytes());
    rcp()
        .args(["--db", &db_path, "--uploads", &uploads_s, "import", &good])
        .assert()
        .success();

    let bad = write_input(
        "cli_no_valid_rows_bad",
        "inv.csv",
        b"INUMSOP,FSOPORT,CANTIDAD\nX,2025-06-09,5\n",
    );
    let output = rcp()
        .args(["--db", &db_path, "--uploads", &uploads_s, "--json", "import", &bad])
        .output()
        .expect("run import");
    assert!(!output.status.success());

    let doc = json_of(&output);
    assert_eq!(doc["success"], false);
    assert!(doc["message"].as_str().unwrap_or("").contains("valid"));

    let output = rcp()
        .args(["--db", &db_path, "--json", "preview"])
        .output()
        .expect("run preview");
    assert_eq!(json_of(&output)["statistics"]["total_registros"], 3);
}

#[test]
fn test_second_import_replaces_the_batch() {
    let db_path = setup_test_db("cli_replace_batch");
    let uploads = temp_dir("cli_replace_batch_uploads");
    let uploads_s = uploads.to_string_lossy().to_string();
    init_db(&db_path, &uploads_s);

    let first = write_input("cli_replace_batch_1", "a.csv", SAMPLE_CSV.as_bytes());
    rcp()
        .args(["--db", &db_path, "--uploads", &uploads_s, "import", &first])
        .assert()
        .success();

    let second = write_input(
        "cli_replace_batch_2",
        "b.csv",
        b"INUMSOP,FSOPORT,CANTIDAD\n99,2025-06-13,1\n",
    );
    rcp()
        .args(["--db", &db_path, "--uploads", &uploads_s, "import", &second])
        .assert()
        .success()
        .stdout(contains("Replacing the current batch (3 records discarded)"));

    let output = rcp()
        .args(["--db", &db_path, "--json", "preview"])
        .output()
        .expect("run preview");
    let doc = json_of(&output);
    assert_eq!(doc["statistics"]["total_registros"], 1);
    assert_eq!(doc["statistics"]["registros_viernes"], 1);
}

#[test]
fn test_preview_human_output() {
    let db_path = setup_test_db("cli_preview_human");
    let uploads = temp_dir("cli_preview_human_uploads");
    let uploads_s = uploads.to_string_lossy().to_string();
    init_db(&db_path, &uploads_s);

    rcp()
        .args(["--db", &db_path, "preview"])
        .assert()
        .success()
        .stdout(contains("No batch loaded"));

    let input = write_input("cli_preview_human", "inventario.csv", SAMPLE_CSV.as_bytes());
    rcp()
        .args(["--db", &db_path, "--uploads", &uploads_s, "import", &input])
        .assert()
        .success();

    rcp()
        .args(["--db", &db_path, "preview", "--limit", "1"])
        .assert()
        .success()
        .stdout(contains("INUMSOP").and(contains("CC100")).and(contains("2 more records")));
}

#[test]
fn test_export_to_directory_uses_timestamped_name() {
    let db_path = setup_test_db("cli_export_dir");
    let uploads = temp_dir("cli_export_dir_uploads");
    let uploads_s = uploads.to_string_lossy().to_string();
    init_db(&db_path, &uploads_s);

    let input = write_input("cli_export_dir", "inventario.csv", SAMPLE_CSV.as_bytes());
    rcp()
        .args(["--db", &db_path, "--uploads", &uploads_s, "import", &input])
        .assert()
        .success();

    let out_dir = temp_dir("cli_export_dir_out");
    rcp()
        .args([
            "--db",
            &db_path,
            "--uploads",
            &uploads_s,
            "export",
            "--dir",
            &out_dir.to_string_lossy(),
        ])
        .assert()
        .success();

    let names: Vec<String> = fs::read_dir(&out_dir)
        .expect("out dir")
        .map(|e| e.expect("entry").file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with("contapyme_"));
    assert!(names[0].ends_with(".csv"));
    // contapyme_YYYY-mm-dd_HH-MM-SS.csv
    assert_eq!(names[0].len(), "contapyme_2025-06-09_10-00-00.csv".len());
}

#[test]
fn test_export_cancel_overwrite_keeps_file() {
    let db_path = setup_test_db("cli_export_cancel");
    let uploads = temp_dir("cli_export_cancel_uploads");
    let uploads_s = uploads.to_string_lossy().to_string();
    init_db(&db_path, &uploads_s);

    let input = write_input("cli_export_cancel", "inventario.csv", SAMPLE_CSV.as_bytes());
    rcp()
        .args(["--db", &db_path, "--uploads", &uploads_s, "import", &input])
        .assert()
        .success();

    let out = temp_out("cli_export_cancel", "csv");
    fs::write(&out, "ORIGINAL").expect("create file");

    rcp()
        .args(["--db", &db_path, "--uploads", &uploads_s, "export", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("export cancelled"));

    assert_eq!(fs::read_to_string(&out).expect("read"), "ORIGINAL");

    // the batch survives a cancelled export
    rcp()
        .args([
            "--db", &db_path, "--uploads", &uploads_s, "export", "--file", &out, "--force",
        ])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).expect("read").contains("INUMSOP"));
}

#[test]
fn test_json_export_onto_existing_file_refuses_without_prompt() {
    let db_path = setup_test_db("cli_export_json_exists");
    let uploads = temp_dir("cli_export_json_exists_uploads");
    let uploads_s = uploads.to_string_lossy().to_string();
    init_db(&db_path, &uploads_s);

    let input = write_input("cli_export_json_exists", "inventario.csv", SAMPLE_CSV.as_bytes());
    rcp()
        .args(["--db", &db_path, "--uploads", &uploads_s, "import", &input])
        .assert()
        .success();

    let out = temp_out("cli_export_json_exists", "csv");
    fs::write(&out, "ORIGINAL").expect("create file");

    let output = rcp()
        .args([
            "--db", &db_path, "--uploads", &uploads_s, "--json", "export", "--file", &out,
        ])
        .write_stdin("y\n")
        .output()
        .expect("run export");
    assert!(!output.status.success());

    let doc = json_of(&output);
    assert_eq!(doc["success"], false);
    assert!(doc["message"].as_str().expect("message").contains("--force"));
    assert_eq!(fs::read_to_string(&out).expect("read"), "ORIGINAL");

    let output = rcp()
        .args([
            "--db", &db_path, "--uploads", &uploads_s, "--json", "export", "--file", &out,
            "--force",
        ])
        .output()
        .expect("run forced export");
    assert!(output.status.success());
    assert_eq!(json_of(&output)["records"], 3);
}

#[test]
fn test_export_into_uploads_dir_survives_cleanup() {
    let db_path = setup_test_db("cli_export_into_uploads");
    let uploads = temp_dir("cli_export_into_uploads_dir");
    let uploads_s = uploads.to_string_lossy().to_string();
    init_db(&db_path, &uploads_s);

    let input = write_input("cli_export_into_uploads", "inventario.csv", SAMPLE_CSV.as_bytes());
    rcp()
        .args(["--db", &db_path, "--uploads", &uploads_s, "import", &input])
        .assert()
        .success();

    let out = uploads.join("2025_cierre.csv");
    let out_s = out.to_string_lossy().to_string();

    let output = rcp()
        .args(["--db", &db_path, "--uploads", &uploads_s, "--json", "export", "--file", &out_s])
        .output()
        .expect("run export");
    assert!(output.status.success());

    let doc = json_of(&output);
    assert_eq!(doc["archivos_eliminados"], 1);
    assert!(fs::read_to_string(&out).expect("export kept").contains("INUMSOP"));
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("cli_log_print");
    let uploads = temp_dir("cli_log_print_uploads");
    let uploads_s = uploads.to_string_lossy().to_string();
    init_db(&db_path, &uploads_s);

    let input = write_input("cli_log_print", "inventario.csv", SAMPLE_CSV.as_bytes());
    rcp()
        .args(["--db", &db_path, "--uploads", &uploads_s, "import", &input])
        .assert()
        .success();
    rcp()
        .args(["--db", &db_path, "--uploads", &uploads_s, "cleanup"])
        .assert()
        .success()
        .stdout(contains("3 records"));

    rcp()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(
            contains("migration_applied")
                .and(contains("init"))
                .and(contains("import"))
                .and(contains("cleanup")),
        );
}

#[test]
fn test_db_info_and_check() {
    let db_path = setup_test_db("cli_db_info");
    let uploads = temp_dir("cli_db_info_uploads");
    init_db(&db_path, &uploads.to_string_lossy());

    rcp()
        .args(["--db", &db_path, "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("Records in temporary table").and(contains("Integrity check passed")));

    assert!(Path::new(&db_path).exists());
}
