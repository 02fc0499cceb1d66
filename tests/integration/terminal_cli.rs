//! Integration tests for the `retrace` binary
//!
//! Runs `retrace play` against piped stdin with a throwaway data directory.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn retrace(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("retrace").expect("binary builds");
    cmd.env_remove("RUST_LOG")
        .env_remove("RETRACE_HOME")
        .arg("--data-dir")
        .arg(data_dir.path());
    cmd
}

/// A one-number range makes the first guess always right
#[test]
fn test_play_single_round() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    retrace(&dir)
        .args(["play", "--low", "3", "--high", "3"])
        .write_stdin("Ada\n3\nn\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello, Ada."))
        .stdout(predicate::str::contains(
            "I am thinking of a number between 3 and 3.",
        ))
        .stdout(predicate::str::contains("Correct in 1 guesses."))
        .stdout(predicate::str::contains("Thank you for playing."));

    // First run writes the default config and a log file under the data dir.
    assert!(dir.path().join("config.toml").exists());
    let log = std::fs::read_to_string(dir.path().join("logs").join("retrace.log"))
        .expect("log file written");
    assert!(log.contains("Starting terminal session"));
    assert!(log.contains("Terminal session finished"));
}

/// Without --data-dir the root comes from RETRACE_HOME
#[test]
fn test_play_uses_home_from_environment() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    Command::cargo_bin("retrace")
        .expect("binary builds")
        .env_remove("RUST_LOG")
        .env("RETRACE_HOME", dir.path())
        .args(["play", "--low", "3", "--high", "3"])
        .write_stdin("Ada\n3\nn\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Thank you for playing."));

    assert!(dir.path().join("config.toml").exists());
    assert!(dir.path().join("logs").join("retrace.log").exists());
}

/// Bad answers are asked again instead of ending the game
#[test]
fn test_play_reprompts_on_bad_input() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    retrace(&dir)
        .args(["play", "--low", "3", "--high", "3"])
        .write_stdin("Ada\nthree\n3\nmaybe\nno\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Sorry, `three` is not a whole number. Try again.",
        ))
        .stdout(predicate::str::contains("Thank you for playing."));
}

/// Closing stdin mid-game is an error, not a hang
#[test]
fn test_play_fails_when_input_closes() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    retrace(&dir)
        .args(["play"])
        .write_stdin("Ada\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("input closed"));
}

/// An explicit config path must exist
#[test]
fn test_missing_config_is_reported() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    retrace(&dir)
        .arg("--config")
        .arg(dir.path().join("nope.toml"))
        .arg("play")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

/// An inverted range is rejected before anything runs
#[test]
fn test_inverted_range_is_rejected() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    retrace(&dir)
        .args(["play", "--low", "10", "--high", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not exceed"));
}
