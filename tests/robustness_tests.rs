use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

#[test]
fn test_malformed_rows_are_skipped() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "description, quantity, rate, tax_rate").unwrap();
    writeln!(file, "Panel, 1, 100, 18").unwrap();
    // Non-numeric quantity
    writeln!(file, "Cable, ten, 20, 18").unwrap();
    // Negative rate
    writeln!(file, "Discount, 1, -50, 0").unwrap();
    // Rate not in the configured table
    writeln!(file, "Battery, 1, 100, 12").unwrap();
    writeln!(file, "Panel, 1, 200, 18").unwrap();

    let mut cmd = Command::new(cargo_bin!("gstbill"));
    cmd.arg("totals").arg(file.path()).args(["--buyer-state", "Gujarat"]);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading line item"))
        .stderr(predicate::str::contains("Tax rate 12% is not configured"))
        .stderr(predicate::str::contains("Invalid value for rate"))
        .stdout(predicate::str::contains(",TOTAL,300.00,27.00,27.00,0.00,354.00"));
}

#[test]
fn test_blank_tax_rate_means_untaxed() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "description, quantity, rate, tax_rate").unwrap();
    writeln!(file, "Survey, 1, 500, ").unwrap();

    let mut cmd = Command::new(cargo_bin!("gstbill"));
    cmd.arg("totals").arg(file.path()).args(["--buyer-state", "Goa"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(",TOTAL,500.00,0.00,0.00,0.00,500.00"));
}

#[test]
fn test_header_only_file_gives_zero_totals() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "description, quantity, rate, tax_rate").unwrap();

    let mut cmd = Command::new(cargo_bin!("gstbill"));
    cmd.arg("totals").arg(file.path()).args(["--buyer-state", "Goa"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(",TOTAL,0.00,0.00,0.00,0.00,0.00"));
}

#[test]
fn test_missing_input_file_fails() {
    let mut cmd = Command::new(cargo_bin!("gstbill"));
    cmd.args(["totals", "tests/fixtures/does_not_exist.csv", "--buyer-state", "Goa"]);

    cmd.assert().failure();
}
