//! Integration tests for the fuga command-line interface
#![allow(deprecated)] // suppress assert_cmd::Command::cargo_bin deprecation in tests

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_default_run_prints_two_line_verdict() {
    let mut cmd = Command::cargo_bin("fuga").unwrap();
    cmd.args(["-n", "200"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Welch t-test score: "))
        .stdout(predicate::str::contains("timing difference detected"));
}

#[test]
fn test_score_line_has_six_decimal_places() {
    let mut cmd = Command::cargo_bin("fuga").unwrap();
    cmd.args(["-n", "200"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::is_match(r"Welch t-test score: \d+\.\d{6}\n").unwrap());
}

#[test]
fn test_json_format_emits_full_result() {
    let output = Command::cargo_bin("fuga")
        .unwrap()
        .args(["--format", "json", "-n", "200", "--seed", "7"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["algorithm"], "kyber512");
    assert_eq!(value["sample_count"], 200);
    assert_eq!(value["threshold"], 5.0);
    assert!(value["t_statistic"].is_f64());
    assert!(value["verdict"] == "leak_suspected" || value["verdict"] == "no_leak");
    assert_eq!(value["fixed"]["n"], 200);
    assert_eq!(value["random"]["n"], 200);
}

#[test]
fn test_summary_table_goes_to_stderr() {
    let mut cmd = Command::cargo_bin("fuga").unwrap();
    cmd.args(["-c", "-n", "200"]);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("usecs/call"))
        .stderr(predicate::str::contains("fixed"))
        .stderr(predicate::str::contains("random"))
        .stdout(predicate::str::contains("usecs/call").not());
}

#[test]
fn test_algorithm_selection_round_trips_to_output() {
    let output = Command::cargo_bin("fuga")
        .unwrap()
        .args(["--format", "json", "-a", "kyber768", "-n", "64"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["algorithm"], "kyber768");
}

#[test]
fn test_rejects_sample_count_below_two() {
    let mut cmd = Command::cargo_bin("fuga").unwrap();
    cmd.args(["-n", "1"]);

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("sample_count"));
}

#[test]
fn test_rejects_nonpositive_threshold() {
    let mut cmd = Command::cargo_bin("fuga").unwrap();
    cmd.args(["-t", "0", "-n", "200"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("threshold"));
}

#[test]
fn test_rejects_unknown_algorithm() {
    let mut cmd = Command::cargo_bin("fuga").unwrap();
    cmd.args(["--algorithm", "rsa2048"]);

    cmd.assert().failure();
}

#[test]
fn test_verdict_is_informational_by_default() {
    // Without --fail-on-leak the exit status is 0 whichever way the
    // verdict goes; a microscopic threshold forces the leak branch
    let mut cmd = Command::cargo_bin("fuga").unwrap();
    cmd.args(["-t", "1e-300", "-n", "200"]);

    cmd.assert().success();
}

#[test]
fn test_fail_on_leak_exits_two_when_flagged() {
    // Any nonzero t statistic exceeds this threshold
    let mut cmd = Command::cargo_bin("fuga").unwrap();
    cmd.args(["--fail-on-leak", "-t", "1e-300", "-n", "200"]);

    cmd.assert()
        .code(2)
        .stdout(predicate::str::contains("❌"));
}

#[test]
fn test_fail_on_leak_passes_without_detection() {
    let mut cmd = Command::cargo_bin("fuga").unwrap();
    cmd.args(["--fail-on-leak", "-t", "1000000", "-n", "200"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("✅"));
}

#[test]
#[cfg(target_os = "linux")]
fn test_invalid_pin_cpu_fails_hard() {
    let mut cmd = Command::cargo_bin("fuga").unwrap();
    cmd.args(["--pin-cpu", "999999", "-n", "200"]);

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("affinity"));
}

#[test]
fn test_debug_flag_logs_to_stderr_only() {
    let mut cmd = Command::cargo_bin("fuga").unwrap();
    cmd.args(["--debug", "-n", "200"]);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("starting leak detection run"))
        .stdout(predicate::str::contains("starting leak detection run").not());
}

#[test]
fn test_help_lists_measurement_flags() {
    let mut cmd = Command::cargo_bin("fuga").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--samples"))
        .stdout(predicate::str::contains("--threshold"))
        .stdout(predicate::str::contains("--fail-on-leak"))
        .stdout(predicate::str::contains("--pin-cpu"));
}

#[test]
fn test_version_flag() {
    let mut cmd = Command::cargo_bin("fuga").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("fuga"));
}
