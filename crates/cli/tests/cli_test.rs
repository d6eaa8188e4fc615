use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn get_vaultsecrets_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_vaultsecrets"))
}

/// Run the binary against `secrets_file` in agent mode with a clean environment
fn run_against(secrets_file: &Path, args: &[&str]) -> Output {
    Command::new(get_vaultsecrets_binary())
        .env_clear()
        .env("VAULTSECRETS_ENABLE_TELEMETRY", "false")
        .arg("--enable-vault")
        .arg("true")
        .arg("--secrets-path")
        .arg(secrets_file)
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn secrets_file(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("secrets");
    fs::write(
        &path,
        r#"{"data": {"SUPER_SECRET_KEY": "shhhhh!", "API_PORT": 8080}}"#,
    )
    .unwrap();
    path
}

#[test]
fn test_keys_lists_names_only() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_against(&secrets_file(&temp_dir), &["keys"]);

    assert!(
        output.status.success(),
        "Failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().collect::<Vec<_>>(), vec!["API_PORT", "SUPER_SECRET_KEY"]);
    assert!(!stdout.contains("shhhhh!"));
}

#[test]
fn test_get_prints_value() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_against(&secrets_file(&temp_dir), &["get", "SUPER_SECRET_KEY"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "shhhhh!");
}

#[test]
fn test_get_json_keeps_value_type() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_against(
        &secrets_file(&temp_dir),
        &["get", "API_PORT", "--format", "json"],
    );

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "8080");
}

#[test]
fn test_get_unknown_name_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_against(&secrets_file(&temp_dir), &["get", "NOPE"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("NOPE"));
}

#[test]
fn test_check_reports_count() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_against(&secrets_file(&temp_dir), &["check", "--format", "json"]);

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["ok"], true);
    assert_eq!(report["keys"], 2);
}

#[test]
fn test_check_fails_on_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_against(&temp_dir.path().join("missing"), &["check"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("failed"));
}
