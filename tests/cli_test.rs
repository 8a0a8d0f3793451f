use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_cli_help_lists_options() {
    let mut cmd = Command::new(cargo_bin!("payments-api"));
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--bind"))
        .stdout(predicate::str::contains("--db-path"))
        .stdout(predicate::str::contains("--max-amount"))
        .stdout(predicate::str::contains("--env"));
}

#[test]
fn test_cli_rejects_non_positive_ceiling() {
    let mut cmd = Command::new(cargo_bin!("payments-api"));
    cmd.arg("--max-amount").arg("0").env_remove("PAYMENTS_ENV");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("max amount must be positive"));
}

#[test]
fn test_cli_rejects_unknown_environment() {
    let mut cmd = Command::new(cargo_bin!("payments-api"));
    cmd.arg("--env").arg("staging");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown environment"));
}

#[test]
fn test_cli_rejects_malformed_amount() {
    let mut cmd = Command::new(cargo_bin!("payments-api"));
    cmd.env("PAYMENTS_MAX_AMOUNT", "lots");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--max-amount"));
}
