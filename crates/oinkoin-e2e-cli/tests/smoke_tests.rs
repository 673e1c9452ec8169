//! Smoke tests for the oinkoin-e2e CLI

#![allow(deprecated)] // Command::cargo_bin
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn oinkoin_e2e() -> Command {
    let mut cmd = Command::cargo_bin("oinkoin-e2e").expect("oinkoin-e2e binary should exist");
    cmd.env_remove("OINKOIN_E2E_CONFIG")
        .env_remove("OINKOIN_E2E_SERVER_URL")
        .env_remove("OINKOIN_E2E_PLATFORM_VERSION")
        .env_remove("OINKOIN_E2E_UDID")
        .env_remove("OINKOIN_E2E_APP_PATH")
        .env_remove("OINKOIN_E2E_APP_PACKAGE")
        .env_remove("RUST_LOG");
    cmd
}

fn write_config(dir: &TempDir, yaml: &str) -> std::path::PathBuf {
    let path = dir.path().join("device.yaml");
    fs::write(&path, yaml).unwrap();
    path
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    oinkoin_e2e()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.3.0"));
}

#[test]
fn test_help_lists_commands() {
    oinkoin_e2e()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("locator"))
        .stdout(predicate::str::contains("range-text"))
        .stdout(predicate::str::contains("smoke"));
}

#[test]
fn test_no_args_fails() {
    oinkoin_e2e().assert().failure();
}

// ============================================================================
// Offline Commands
// ============================================================================

#[test]
fn test_locator_expense() {
    oinkoin_e2e()
        .args(["locator", "Groceries", "expense", "50.25"])
        .assert()
        .success()
        .stdout("Groceries\\n-50.25\n");
}

#[test]
fn test_locator_income_grouped() {
    oinkoin_e2e()
        .args(["locator", "Salary", "income", "1500"])
        .assert()
        .success()
        .stdout("Salary\\n1,500.00\n");
}

#[test]
fn test_locator_rejects_bad_amount() {
    oinkoin_e2e()
        .args(["locator", "Salary", "income", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid argument"));
}

#[test]
fn test_range_text_month() {
    oinkoin_e2e()
        .args(["range-text", "month", "2025", "10"])
        .assert()
        .success()
        .stdout("October 2025\n");
}

#[test]
fn test_range_text_year() {
    oinkoin_e2e()
        .args(["range-text", "year", "2020"])
        .assert()
        .success()
        .stdout("Jan 1 - Dec 31, 2020\n");
}

#[test]
fn test_range_text_custom() {
    oinkoin_e2e()
        .args(["range-text", "custom", "2025-10-05", "2025-11-12"])
        .assert()
        .success()
        .stdout("Oct 5 - Nov 12, 2025\n");
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_check_defaults() {
    oinkoin_e2e()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("configuration valid"));
}

#[test]
fn test_check_quiet_prints_nothing() {
    oinkoin_e2e().args(["check", "-q"]).assert().success().stdout("");
}

#[test]
fn test_check_rejects_invalid_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "implicit_wait_secs: 0\n");
    oinkoin_e2e()
        .arg("check")
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("implicit_wait_secs"));
}

#[test]
fn test_check_rejects_malformed_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "reset_policy: sometimes\n");
    oinkoin_e2e()
        .arg("check")
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"))
        .stderr(predicate::str::contains("device.yaml"));
}

#[test]
fn test_config_reads_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "udid: emulator-5554\nplatform_version: \"14\"\n");
    oinkoin_e2e()
        .arg("config")
        .arg("--config")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("udid: emulator-5554"))
        .stdout(predicate::str::contains("\"appium:platformVersion\": \"14\""));
}

#[test]
fn test_env_overrides_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "udid: emulator-5554\n");
    oinkoin_e2e()
        .args(["config", "--capabilities"])
        .env("OINKOIN_E2E_CONFIG", &path)
        .env("OINKOIN_E2E_UDID", "R58M123")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"appium:udid\": \"R58M123\""));
}

#[test]
fn test_missing_config_file_fails() {
    oinkoin_e2e()
        .args(["check", "--config", "/nonexistent/device.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}
