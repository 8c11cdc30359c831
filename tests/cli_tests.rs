//! End-to-end tests of the `workout-planner` binary using the embedded store

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("workout-planner").expect("binary should build");
    cmd.env_remove("WORKOUT_DB_URL")
        .env("WORKOUT_DB_PATH", dir.path().join("workout_db.json"));
    cmd
}

#[test]
fn test_catalog_list_seeds_store() {
    let dir = tempfile::tempdir().unwrap();

    cmd(&dir)
        .args(["catalog", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exercises in catalog (17)"))
        .stdout(predicate::str::contains("Foam Rolling (15 minutes)"));

    assert!(dir.path().join("workout_db.json").exists());
}

#[test]
fn test_catalog_facets_json() {
    let dir = tempfile::tempdir().unwrap();

    let output = cmd(&dir)
        .args(["--format", "json", "catalog", "facets"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let facets: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        facets["sports"],
        serde_json::json!(["biking", "running", "swimming", "yoga"])
    );
}

#[test]
fn test_plan_for_swimming() {
    let dir = tempfile::tempdir().unwrap();

    let output = cmd(&dir)
        .args(["--format", "json", "plan", "--sport", "swimming"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["workout_plan"].as_array().unwrap().len(), 3);
    assert!(plan.get("message").is_none());
}

#[test]
fn test_plan_without_selection_prints_guidance() {
    let dir = tempfile::tempdir().unwrap();

    cmd(&dir)
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Please select at least one attribute to generate a workout.",
        ));
}

#[test]
fn test_plan_tsv_limit() {
    let dir = tempfile::tempdir().unwrap();

    let output = cmd(&dir)
        .args(["--format", "tsv", "plan", "--muscle", "core", "-n", "3"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    // header + 3 exercises
    assert_eq!(stdout.lines().count(), 4);
}

#[test]
fn test_catalog_export() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("exported.json");

    cmd(&dir)
        .args(["catalog", "export"])
        .arg(&out)
        .assert()
        .success();

    let exported: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(exported["exercises"].as_array().unwrap().len(), 17);
}

#[test]
fn test_corrupt_store_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("workout_db.json"), "{broken").unwrap();

    cmd(&dir)
        .args(["catalog", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse catalog document"));
}

#[test]
fn test_unreachable_cloud_store_fails() {
    let dir = tempfile::tempdir().unwrap();

    cmd(&dir)
        .env("WORKOUT_DB_URL", "http://127.0.0.1:9")
        .args(["catalog", "list"])
        .assert()
        .failure();
}

#[test]
fn test_plan_rejects_zero_exercises() {
    let dir = tempfile::tempdir().unwrap();

    cmd(&dir)
        .args(["plan", "--muscle", "core", "-n", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value '0'"));
}
