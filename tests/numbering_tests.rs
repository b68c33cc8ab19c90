use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn next_number(args: &[&str]) -> Command {
    let mut cmd = Command::new(cargo_bin!("gstbill"));
    cmd.arg("next-number").args(args);
    cmd
}

#[test]
fn test_first_estimate_number() {
    next_number(&["--kind", "estimate"])
        .assert()
        .success()
        .stdout("TE2526001\n");
}

#[test]
fn test_next_estimate_number() {
    next_number(&["--kind", "estimate", "--last", "TE2526003"])
        .assert()
        .success()
        .stdout("TE2526004\n");
}

#[test]
fn test_invoice_number_carries_into_new_digit() {
    next_number(&["--last", "INV-099"])
        .assert()
        .success()
        .stdout("INV-100\n");

    next_number(&["--last", "INV-999"])
        .assert()
        .success()
        .stdout("INV-1000\n");
}

#[test]
fn test_explicit_prefix_and_width() {
    next_number(&["--prefix", "BSE/", "--width", "5", "--last", "BSE/00041"])
        .assert()
        .success()
        .stdout("BSE/00042\n");
}

#[test]
fn test_foreign_prefix_fails() {
    next_number(&["--kind", "estimate", "--last", "TE2425017"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not start with the expected prefix"));
}

#[test]
fn test_foreign_prefix_restarts_when_asked() {
    next_number(&[
        "--kind",
        "estimate",
        "--last",
        "TE2425017",
        "--restart-on-mismatch",
    ])
    .assert()
    .success()
    .stdout("TE2526001\n");
}

#[test]
fn test_non_numeric_suffix_fails() {
    next_number(&["--last", "INV-12a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sequence is not numeric"));
}
