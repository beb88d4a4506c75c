//! Integration tests for the brew binary.
//!
//! These tests verify end-to-end behavior including:
//! - The add/undo/status workflow
//! - Caution and summary output
//! - Day-window filtering across runs
//! - Recipe display

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("brew"))
}

/// Log a cup at a pinned instant
fn add_at(data_dir: &std::path::Path, at: &str) -> assert_cmd::assert::Assert {
    cli()
        .arg("add")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--at")
        .arg(at)
        .assert()
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Daily coffee cup counter and espresso bar",
        ));
}

#[test]
fn test_status_starts_at_zero() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--at")
        .arg("2024-05-06T09:00:00+00:00")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 cups today"))
        .stdout(predicate::str::contains("sleep").not());
}

#[test]
fn test_add_increments_and_persists() {
    let temp_dir = setup_test_dir();

    add_at(temp_dir.path(), "2024-05-06T08:00:00+00:00")
        .success()
        .stdout(predicate::str::contains("Cup logged"))
        .stdout(predicate::str::contains("1 cup today"));

    add_at(temp_dir.path(), "2024-05-06T09:30:00+00:00")
        .success()
        .stdout(predicate::str::contains("2 cups today"));

    // Count survives across invocations
    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--at")
        .arg("2024-05-06T10:00:00+00:00")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 cups today"))
        .stdout(predicate::str::contains("You're good for sleep."));
}

#[test]
fn test_add_creates_log_file() {
    let temp_dir = setup_test_dir();

    add_at(temp_dir.path(), "2024-05-06T08:00:00+00:00").success();

    let log_path = temp_dir.path().join("daily_cup_timestamps.json");
    let contents = fs::read_to_string(&log_path).expect("Failed to read cup log");
    assert!(contents.starts_with('['));
}

#[test]
fn test_late_cup_caution() {
    let temp_dir = setup_test_dir();

    add_at(temp_dir.path(), "2024-05-06T17:00:00+00:00")
        .success()
        .stdout(predicate::str::contains("Late caffeine"));
}

#[test]
fn test_fourth_cup_hits_daily_limit() {
    let temp_dir = setup_test_dir();

    for at in [
        "2024-05-06T08:00:00+00:00",
        "2024-05-06T09:00:00+00:00",
        "2024-05-06T10:00:00+00:00",
    ] {
        add_at(temp_dir.path(), at)
            .success()
            .stdout(predicate::str::contains("daily limit").not());
    }

    add_at(temp_dir.path(), "2024-05-06T10:30:00+00:00")
        .success()
        .stdout(predicate::str::contains("You're at the daily limit"));
}

#[test]
fn test_noon_spread_caution() {
    let temp_dir = setup_test_dir();

    add_at(temp_dir.path(), "2024-05-06T08:00:00+00:00").success();
    add_at(temp_dir.path(), "2024-05-06T13:00:00+00:00").success();

    // Third cup, only one before noon
    add_at(temp_dir.path(), "2024-05-06T13:30:00+00:00")
        .success()
        .stdout(predicate::str::contains("first two before noon"));
}

#[test]
fn test_late_summary_after_cutoff_cup() {
    let temp_dir = setup_test_dir();

    add_at(temp_dir.path(), "2024-05-06T15:00:00+00:00").success();
    add_at(temp_dir.path(), "2024-05-06T16:30:00+00:00").success();

    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--at")
        .arg("2024-05-06T20:00:00+00:00")
        .assert()
        .success()
        .stdout(predicate::str::contains("Last cup late"));
}

#[test]
fn test_undo_removes_latest() {
    let temp_dir = setup_test_dir();

    add_at(temp_dir.path(), "2024-05-06T08:00:00+00:00").success();
    add_at(temp_dir.path(), "2024-05-06T09:00:00+00:00").success();

    cli()
        .arg("undo")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--at")
        .arg("2024-05-06T10:00:00+00:00")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 cup today"));
}

#[test]
fn test_undo_with_no_cups() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("undo")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--at")
        .arg("2024-05-06T10:00:00+00:00")
        .assert()
        .success()
        .stdout(predicate::str::contains("No cups logged today"));
}

#[test]
fn test_new_day_resets_count() {
    let temp_dir = setup_test_dir();

    add_at(temp_dir.path(), "2024-05-06T20:00:00+00:00").success();

    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--at")
        .arg("2024-05-07T08:00:00+00:00")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 cups today"));
}

#[test]
fn test_day_boundary_follows_offset() {
    let temp_dir = setup_test_dir();

    // 23:30 local on May 6 (UTC-4)
    add_at(temp_dir.path(), "2024-05-06T23:30:00-04:00").success();

    // Ten minutes later it is May 7 locally, so the counter reads zero
    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--at")
        .arg("2024-05-07T00:10:00-04:00")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 cups today"));
}

#[test]
fn test_recipes_lists_all_four() {
    cli()
        .arg("recipes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Latte"))
        .stdout(predicate::str::contains("Flat White"))
        .stdout(predicate::str::contains("Cappuccino"))
        .stdout(predicate::str::contains("Cortado"));
}

#[test]
fn test_recipe_detail() {
    cli()
        .arg("recipe")
        .arg("latte")
        .assert()
        .success()
        .stdout(predicate::str::contains("LATTE"))
        .stdout(predicate::str::contains("Ratio 1:4"))
        .stdout(predicate::str::contains("Espresso 1 · Milk 4"))
        .stdout(predicate::str::contains("Pull 1 shot of espresso."));
}

#[test]
fn test_recipe_lookup_is_case_insensitive() {
    cli()
        .arg("recipe")
        .arg("FLAT WHITE")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ratio 1:3"));
}

#[test]
fn test_unknown_recipe_fails() {
    cli()
        .arg("recipe")
        .arg("macchiato")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown recipe"));
}

#[test]
fn test_invalid_at_value_fails() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--at")
        .arg("yesterday-ish")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --at value"));
}
