use assert_cmd::Command;
use predicates::prelude::*;

const BACKEND_VARS: [&str; 4] = [
    "SUPABASE_URL",
    "SUPABASE_ANON_KEY",
    "NEXT_PUBLIC_SUPABASE_URL",
    "NEXT_PUBLIC_SUPABASE_ANON_KEY",
];

fn rotaly() -> Command {
    let mut cmd = Command::cargo_bin("rotaly").unwrap();
    for var in BACKEND_VARS {
        cmd.env_remove(var);
    }
    cmd.env_remove("ROTALY_TIMEOUT_SECS");
    cmd
}

#[test]
fn status_reports_unconfigured_backend() {
    rotaly()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("not configured"));
}

#[test]
fn status_json() {
    rotaly()
        .args(["--format", "json", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"configured\": false"));
}

#[test]
fn status_json_includes_metrics() {
    let output = rotaly()
        .args(["--format", "json", "status"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let status: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let metrics = &status["metrics"];
    assert!(metrics["counters"].is_object());
    assert!(metrics["histograms"].is_object());
    assert!(metrics["uptime_secs"].is_u64());
    assert_eq!(metrics["session_id"], status["session_id"]);
}

#[test]
fn list_without_backend_is_empty_not_an_error() {
    rotaly()
        .args(["list", "bookings", "--limit", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No bookings"));

    rotaly()
        .args(["--format", "json", "list", "properties"])
        .assert()
        .success()
        .stdout(predicate::str::diff("[]\n"));
}

#[test]
fn get_without_backend_prints_null_json() {
    rotaly()
        .args(["get", "users", "u1", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::diff("null\n"));
}

#[test]
fn reviews_need_a_property() {
    rotaly()
        .args(["list", "reviews"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--property"));
}

#[test]
fn bad_filter_value_fails() {
    rotaly()
        .args(["list", "tickets", "--status", "frozen"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid --status value `frozen`"));
}

#[test]
fn invalid_url_is_rejected() {
    rotaly()
        .env("SUPABASE_URL", "ftp://example.com")
        .env("SUPABASE_ANON_KEY", "key")
        .arg("status")
        .assert()
        .failure();
}
