//! End-to-end runs of the `carbutler` binary against a temp data dir

use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

fn carbutler(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_carbutler"))
        .args(["--mock", "--data-dir"])
        .arg(home.join("data"))
        .args(args)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run carbutler")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_add_list_and_mileage() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let home = temp_dir.path();

    let added = carbutler(
        home,
        &["add", "--make", "Toyota", "--model", "Camry", "--year", "2020", "--mileage", "50000", "--vin", "VIN0000001"],
    );
    assert!(added.status.success(), "{}", String::from_utf8_lossy(&added.stderr));
    assert!(stdout(&added).contains("Successfully added 2020 Toyota Camry (50,000 miles)"));

    let listed = carbutler(home, &["list", "--format", "json"]);
    assert!(listed.status.success());
    let vehicles: serde_json::Value = serde_json::from_str(&stdout(&listed)).unwrap();
    assert_eq!(vehicles.as_array().map(Vec::len), Some(1));
    assert_eq!(vehicles[0]["vin"], "VIN0000001");

    let updated = carbutler(home, &["mileage", "1", "54300"]);
    assert!(updated.status.success());

    let checked = carbutler(home, &["check", "VIN0000001"]);
    let text = stdout(&checked);
    assert!(text.contains("🟡 Oil Change: Due in 200 miles"));
    assert!(text.contains("🔴 Tire Rotation: OVERDUE"));

    assert!(home.join("data").join("vehicles.json").exists());
}

#[test]
fn test_errors_exit_nonzero() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let home = temp_dir.path();

    carbutler(
        home,
        &["add", "--make", "Honda", "--model", "Civic", "--year", "2018", "--mileage", "80000"],
    );

    let lowered = carbutler(home, &["mileage", "1", "100"]);
    assert_eq!(lowered.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&lowered.stderr).contains("Error: New mileage (100)"));

    let missing = carbutler(home, &["check", "7"]);
    assert_eq!(missing.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&missing.stderr).contains("Vehicle not found"));
}

#[test]
fn test_interactive_session_exits_on_eof() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let output = carbutler(temp_dir.path(), &[]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Thank you for using CarButler!"));
}
