//! Tests for the qr-batch binary: exit codes and console output

use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

fn qr_batch(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_qr-batch"))
        .current_dir(dir)
        .arg("--config")
        .arg(dir.join("config.json"))
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_generate_with_defaults() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("datosempleadosadd.csv"),
        "cedula,nombre\n1001,Alice\n1002,Bob\n",
    )
    .unwrap();

    let output = qr_batch(dir.path(), &["generate"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("Directory 'codigos_qr' created."));
    assert!(stdout.contains("ID: 1001 and name: Alice"));
    assert!(stdout.contains("2 QR codes generated"));
    assert!(dir.path().join("codigos_qr").join("1001.png").exists());
    assert!(dir.path().join("codigos_qr").join("1002.png").exists());
}

#[test]
fn test_missing_input_exits_nonzero() {
    let dir = tempdir().unwrap();

    let output = qr_batch(dir.path(), &["generate", "--input", "absent.csv"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("absent.csv"));
    assert!(stderr.contains("not found"));
    assert!(!dir.path().join("codigos_qr").exists());
}

#[test]
fn test_wrong_header_prints_summary_and_exits_nonzero() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("in.csv"), "id,name\n1001,Alice\n").unwrap();

    let output = qr_batch(dir.path(), &["generate", "-i", "in.csv"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("column 'cedula' not found"));
    assert!(stdout.contains("0 QR codes generated"));
}

#[test]
fn test_custom_fields_and_json_summary() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("in.csv"), "id,name\nA-1,Alice\nA-2,Bob\n").unwrap();

    let output = qr_batch(
        dir.path(),
        &[
            "--format", "json", "generate", "-i", "in.csv", "-o", "out", "--id-field", "id",
            "--name-field", "name",
        ],
    );

    assert_eq!(output.status.code(), Some(0));
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["written"], 2);
    assert_eq!(summary["skipped"], 0);
    assert!(summary["aborted"].is_null());
    assert!(dir.path().join("out").join("A-2.png").exists());
}

#[test]
fn test_config_set_is_used_by_generate() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("in.csv"), "id,nombre\n77,Zoe\n").unwrap();

    let output = qr_batch(dir.path(), &["config", "--set-input", "in.csv", "--set-id-field", "id"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(dir.path().join("config.json").exists());

    let output = qr_batch(dir.path(), &["generate", "--quiet"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(dir.path().join("codigos_qr").join("77.png").exists());
}

#[test]
fn test_record_too_long_for_forced_version_is_skipped() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("in.csv"),
        "cedula,nombre\n1001,Alice\nABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789,Long\n1003,Carol\n",
    )
    .unwrap();

    let output = qr_batch(dir.path(), &["generate", "-i", "in.csv", "--no-fit"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(0));
    assert!(stderr.contains("Error processing row with ID 'ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789' (line 3)"));
    assert!(stdout.contains("2 QR codes generated"));
    let out = dir.path().join("codigos_qr");
    assert!(out.join("1001.png").exists());
    assert!(out.join("1003.png").exists());
    assert!(!out.join("ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789.png").exists());
}

#[test]
fn test_skip_policy_continues_past_missing_column() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("in.csv"), "cedula,apellido\n1001,Smith\n").unwrap();

    let output = qr_batch(
        dir.path(),
        &["generate", "-i", "in.csv", "--on-missing-field", "skip"],
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(0));
    assert!(stderr.contains("column 'nombre' not found"));
    assert!(stderr.contains("skipping row"));
    assert!(stdout.contains("0 QR codes generated"));
}

#[test]
fn test_oversized_border_is_rejected() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("in.csv"), "cedula,nombre\n1001,Alice\n").unwrap();

    let output = qr_batch(dir.path(), &["generate", "-i", "in.csv", "--border", "2147483647"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("border"));
    assert!(!dir.path().join("codigos_qr").exists());
}
