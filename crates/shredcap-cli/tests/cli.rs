//! End-to-end runs of the `shredcap` binary against snapshot files.

use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

const SNAPSHOT: &str = r#"{
  "state_tables": {
    "relud-17123.test.shredder_state": ["shredder:US.job_1", "shredder:US.job_2", "shredder:US.job_3"]
  },
  "jobs": {
    "shredder:US.job_1": {
      "destination_table": "moz-fx-data-shared-prod:telemetry_derived.main_summary_v4",
      "total_bytes_processed": 1000000000,
      "slot_millis": 500000,
      "state": "DONE"
    },
    "shredder:US.job_2": {
      "destination_table": "moz-fx-data-shared-prod.telemetry_derived.clients_daily_v6",
      "total_bytes_processed": 5,
      "slot_millis": 5000000000,
      "state": "RUNNING"
    },
    "shredder:US.job_3": {
      "destination_table": "moz-fx-data-shared-prod.telemetry_derived.clients_daily_v6",
      "total_bytes_processed": 5,
      "slot_millis": 5000000000,
      "state": "DONE",
      "errors": [{ "reason": "invalidQuery", "message": "syntax error" }]
    }
  },
  "tables": [
    { "table": "moz-fx-data-shared-prod.telemetry_stable.main_v4", "num_bytes": 1125899906842624 },
    { "table": "moz-fx-data-shared-prod.telemetry_derived.main_summary_v4", "num_bytes": 7200000000000 },
    { "table": "moz-fx-data-shared-prod.telemetry_derived.clients_daily_v6", "num_bytes": 1099511627776 }
  ]
}"#;

const TARGETS: &str = r#"
default_project: moz-fx-data-shared-prod
targets:
  - telemetry_stable.main_v4
  - telemetry_derived.main_summary_v4
  - telemetry_derived.clients_daily_v6
"#;

fn workspace(snapshot: &str, targets: &str) -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("snapshot.json"), snapshot).expect("write snapshot");
    fs::write(dir.path().join("targets.yaml"), targets).expect("write targets");
    dir
}

fn shredcap(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("shredcap").expect("binary");
    cmd.env_remove("SHREDCAP_SLOTS")
        .env_remove("SHREDCAP_DAYS")
        .env_remove("SHREDCAP_PARALLELISM")
        .env_remove("SHREDCAP_STATE_TABLE")
        .env_remove("RUST_LOG")
        .arg("--warehouse")
        .arg(dir.path().join("snapshot.json"))
        .arg("--targets")
        .arg(dir.path().join("targets.yaml"));
    cmd
}

#[test]
fn prints_full_report() {
    let dir = workspace(SNAPSHOT, TARGETS);
    let output = shredcap(&dir).output().expect("run");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "shredder is processing 111.759 GiB/min using 1000 slots",
            "processing speed is 28.68% cheaper than on-demand at 100% utilization",
            "shredder is processing main_summary_v4 at 111.759 GiB/min using 1000 slots",
            "processing speed for main_summary_v4 is 28.68% cheaper than on-demand at 100% utilization",
            "1:00:00 to process main_summary_v4 with 1000 slots",
            "2 slots needed to process 0.007 PiB every 28 day(s) for everything except main_v4",
            "$5,561.90/mo to process 1.000 PiB every 28 day(s) on-demand for main_v4",
        ]
    );
}

#[test]
fn quiet_mode_and_overrides() {
    let dir = workspace(SNAPSHOT, TARGETS);
    let output = shredcap(&dir)
        .args(["-q", "-s", "2000", "-d", "14", "-P", "2"])
        .output()
        .expect("run");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "0:30:00 to process main_summary_v4 with 2000 slots");
    assert!(lines[1].ends_with("every 14 day(s) for everything except main_v4"));
    assert_eq!(
        lines[2],
        "$11,123.81/mo to process 1.000 PiB every 14 day(s) on-demand for main_v4"
    );
}

#[test]
fn missing_state_table_exits_nonzero() {
    let dir = workspace(SNAPSHOT, TARGETS);
    let output = shredcap(&dir)
        .args(["--state-table", "other.test.shredder_state"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Error: "));
    assert!(stderr.contains("state table not found"));
}

#[test]
fn zero_byte_jobs_exit_nonzero() {
    let degenerate = SNAPSHOT.replace("\"total_bytes_processed\": 1000000000", "\"total_bytes_processed\": 0");
    let dir = workspace(&degenerate, TARGETS);
    let output = shredcap(&dir).output().expect("run");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("degenerate aggregate"));
}

#[test]
fn env_sets_slots_and_flags_win() {
    let dir = workspace(SNAPSHOT, TARGETS);

    let from_env = shredcap(&dir)
        .env("SHREDCAP_SLOTS", "2000")
        .arg("-q")
        .output()
        .expect("run");
    assert!(from_env.status.success());
    let stdout = String::from_utf8(from_env.stdout).unwrap();
    assert_eq!(
        stdout.lines().next(),
        Some("0:30:00 to process main_summary_v4 with 2000 slots")
    );

    let flag_wins = shredcap(&dir)
        .env("SHREDCAP_SLOTS", "2000")
        .args(["-q", "-s", "500"])
        .output()
        .expect("run");
    assert!(flag_wins.status.success());
    let stdout = String::from_utf8(flag_wins.stdout).unwrap();
    assert_eq!(
        stdout.lines().next(),
        Some("2:00:00 to process main_summary_v4 with 500 slots")
    );
}

#[test]
fn unparseable_env_values_fall_back_to_defaults() {
    let dir = workspace(SNAPSHOT, TARGETS);
    let output = shredcap(&dir)
        .env("SHREDCAP_SLOTS", "lots")
        .env("SHREDCAP_DAYS", "not-a-number")
        .arg("-q")
        .output()
        .expect("run");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "1:00:00 to process main_summary_v4 with 1000 slots");
    assert!(lines[1].ends_with("every 28 day(s) for everything except main_v4"));
}

#[test]
fn missing_targets_file_names_the_path() {
    let dir = workspace(SNAPSHOT, TARGETS);
    let missing = dir.path().join("absent.yaml");
    let output = Command::cargo_bin("shredcap")
        .expect("binary")
        .env_remove("RUST_LOG")
        .arg("--warehouse")
        .arg(dir.path().join("snapshot.json"))
        .arg("--targets")
        .arg(&missing)
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Error: I/O error reading"));
    assert!(stderr.contains(&missing.display().to_string()));
}
