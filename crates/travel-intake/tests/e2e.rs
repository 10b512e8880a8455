// End-to-end tests for the travel-intake binary.
// Every test points the binary at its own temp data directory and clears
// the remote settings, so nothing leaves the machine.

use std::path::Path;
use std::process::{Command, Output};

const REMOTE_ENV: [&str; 4] = [
    "HIDRIVE_DAV_BASEURL",
    "HIDRIVE_USER",
    "HIDRIVE_PASS",
    "HIDRIVE_BASEPATH",
];

fn intake(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_travel-intake"));
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("INTAKE_DATA_DIR")
        .env_remove("HOTEL_API_BASEURL")
        .env_remove("HOTEL_API_KEY");
    for key in REMOTE_ENV {
        cmd.env_remove(key);
    }
    cmd
}

/// Write a config file pointing the data directory into `home/data`.
fn write_config(home: &Path) -> std::path::PathBuf {
    let path = home.join("intake.toml");
    let data_dir = home.join("data");
    std::fs::write(
        &path,
        format!("[storage]\ndata_dir = {:?}\n", data_dir.to_string_lossy()),
    )
    .unwrap();
    path
}

fn run(home: &Path, args: &[&str]) -> Output {
    let config = write_config(home);
    intake(home)
        .arg("--config")
        .arg(&config)
        .args(args)
        .output()
        .expect("failed to run travel-intake")
}

const BERLIN: [&str; 7] = [
    "submit",
    "--destination",
    "Berlin, Deutschland",
    "--start",
    "2025-03-10",
    "--end",
    "2025-03-12",
];

#[test]
fn cli_help_displays_correctly() {
    let output = Command::new(env!("CARGO_BIN_EXE_travel-intake"))
        .arg("--help")
        .output()
        .expect("failed to run travel-intake --help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("submit"));
    assert!(stdout.contains("list"));
    assert!(stdout.contains("hotels"));
    assert!(stdout.contains("config"));
}

#[test]
fn submit_help_shows_form_fields() {
    let output = Command::new(env!("CARGO_BIN_EXE_travel-intake"))
        .args(["submit", "--help"])
        .output()
        .expect("failed to run travel-intake submit --help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in [
        "--destination",
        "--start",
        "--end",
        "--appointment",
        "--transport",
        "--budget",
        "--export",
        "--no-sync",
    ] {
        assert!(stdout.contains(flag), "missing {flag} in submit help");
    }
}

#[test]
fn submit_writes_ledger_row_and_case_folder() {
    let home = tempfile::tempdir().unwrap();
    let output = run(home.path(), &BERLIN);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let request_id = String::from_utf8_lossy(&output.stdout).trim().to_string();
    assert_eq!(request_id.len(), 36, "stdout should be the request id");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("HIDRIVE_"), "expected optional upload hint");

    let data = home.path().join("data");
    let ledger = std::fs::read_to_string(data.join("reiseanfragen.csv")).unwrap();
    let lines: Vec<&str> = ledger.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("request_id,created_at,Ziel,Start,Ende"));
    assert!(lines[1].starts_with(&request_id));
    assert!(lines[1].contains("\"Berlin, Deutschland\""));

    let folder = data
        .join("requests")
        .join(format!("20250310_berlin-deutschland_{}", &request_id[..8]));
    let snapshot: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(folder.join("request.json")).unwrap())
            .unwrap();
    assert_eq!(snapshot["request_id"], request_id.as_str());
    assert_eq!(snapshot["Ziel"], "Berlin, Deutschland");
    assert_eq!(snapshot["Termin"], "09:00");
    assert_eq!(snapshot["Hotelbudget"], 150);

    let summary = std::fs::read_to_string(folder.join("summary.md")).unwrap();
    assert!(summary.contains("**Ziel:** Berlin, Deutschland"));
}

#[test]
fn submit_rejects_end_before_start() {
    let home = tempfile::tempdir().unwrap();
    let output = run(
        home.path(),
        &[
            "submit",
            "--destination",
            "Hamburg",
            "--start",
            "2025-03-12",
            "--end",
            "2025-03-10",
        ],
    );

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("end date before start date"));
    assert!(!home.path().join("data").exists());
}

#[test]
fn submit_rejects_blank_destination() {
    let home = tempfile::tempdir().unwrap();
    let output = run(
        home.path(),
        &[
            "submit",
            "--destination",
            "   ",
            "--start",
            "2025-03-10",
            "--end",
            "2025-03-10",
        ],
    );

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("destination required"));
    assert!(!home.path().join("data").exists());
}

#[test]
fn list_json_returns_submissions_in_order() {
    let home = tempfile::tempdir().unwrap();
    assert!(run(home.path(), &BERLIN).status.success());
    assert!(
        run(
            home.path(),
            &[
                "submit",
                "--destination",
                "München",
                "--start",
                "2025-04-01",
                "--end",
                "2025-04-02",
                "--transport",
                "bahn",
            ],
        )
        .status
        .success()
    );

    let output = run(home.path(), &["--format", "json", "list"]);
    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["Ziel"], "Berlin, Deutschland");
    assert_eq!(rows[1]["Ziel"], "München");
    assert_eq!(rows[1]["Verkehr"], "Bahn");

    let output = run(home.path(), &["--format", "json", "list", "--limit", "1"]);
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["Ziel"], "München");
}

#[test]
fn submit_export_writes_single_row_csv() {
    let home = tempfile::tempdir().unwrap();
    let export = home.path().join("export.csv");
    let mut args = BERLIN.to_vec();
    let export_arg = export.to_string_lossy().to_string();
    args.extend(["--export", export_arg.as_str()]);

    let output = run(home.path(), &args);
    assert!(output.status.success());

    let content = std::fs::read_to_string(&export).unwrap();
    assert_eq!(content.lines().count(), 2);
    assert!(content.contains("Berlin, Deutschland"));
}

#[test]
fn submit_export_failure_still_reports_stored_request() {
    let home = tempfile::tempdir().unwrap();
    let export = home.path().join("no-such-dir").join("out.csv");
    let mut args = BERLIN.to_vec();
    let export_arg = export.to_string_lossy().to_string();
    args.extend(["--export", export_arg.as_str()]);

    let output = run(home.path(), &args);
    assert!(output.status.success());
    let request_id = String::from_utf8_lossy(&output.stdout).trim().to_string();
    assert_eq!(request_id.len(), 36);
    assert!(String::from_utf8_lossy(&output.stderr).contains("export failed"));

    let ledger = std::fs::read_to_string(home.path().join("data/reiseanfragen.csv")).unwrap();
    assert_eq!(ledger.lines().count(), 2);
}

#[test]
fn submit_json_with_stdout_export_stays_valid_json() {
    let home = tempfile::tempdir().unwrap();
    let mut args = vec!["--format", "json"];
    args.extend(BERLIN);
    args.extend(["--export", "-"]);

    let output = run(home.path(), &args);
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let csv = report["export_csv"].as_str().unwrap();
    assert!(csv.starts_with("request_id,created_at,Ziel"));
    assert!(csv.contains(report["request_id"].as_str().unwrap()));
    assert!(report["export"].is_null());
}

#[test]
fn data_dir_env_override_wins_over_config() {
    let home = tempfile::tempdir().unwrap();
    let override_dir = home.path().join("elsewhere");
    let config = write_config(home.path());

    let output = intake(home.path())
        .env("INTAKE_DATA_DIR", &override_dir)
        .arg("--config")
        .arg(&config)
        .args(BERLIN)
        .output()
        .expect("failed to run travel-intake");

    assert!(output.status.success());
    assert!(override_dir.join("reiseanfragen.csv").exists());
    assert!(!home.path().join("data").exists());
}

#[test]
fn hotels_without_configuration_fails() {
    let home = tempfile::tempdir().unwrap();
    let output = run(home.path(), &["hotels", "--city", "Berlin"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("HOTEL_API_BASEURL"));
}

#[test]
fn config_show_masks_password() {
    let home = tempfile::tempdir().unwrap();
    let config = write_config(home.path());
    let output = intake(home.path())
        .env("HIDRIVE_PASS", "supersecretpassword")
        .arg("--config")
        .arg(&config)
        .args(["config", "show"])
        .output()
        .expect("failed to run travel-intake config show");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("supersecretpassword"));
    assert!(stdout.contains("sup...word"));
}
