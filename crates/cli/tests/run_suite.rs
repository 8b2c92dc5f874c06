// Integration tests for the gprobe binary: run / validate / scenarios.
// Run with: cargo test -p geoprobe-cli --test run_suite

use std::path::{Path, PathBuf};
use std::process::Command;

use httpmock::prelude::*;

fn gprobe() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_gprobe"));
    // Keep a developer's real override out of the tests
    cmd.env_remove("API_BASE_URL");
    cmd
}

/// Write `catalog.csv` + `suite.toml` into `dir`; returns the config path.
/// `base_url: None` leaves the config silent so resolution falls through.
fn write_suite(dir: &Path, catalog: &str, base_url: Option<&str>, log: bool) -> PathBuf {
    std::fs::write(dir.join("catalog.csv"), catalog).unwrap();

    let mut config = String::from("name = \"binary smoke\"\ncatalog = \"catalog.csv\"\n");
    if let Some(url) = base_url {
        config.push_str(&format!("base_url = \"{url}\"\n"));
    }
    config.push_str("timeout_secs = 5\n");
    if log {
        config.push_str("log_file = \"run.log\"\n");
    }

    let path = dir.join("suite.toml");
    std::fs::write(&path, config).unwrap();
    path
}

fn read_report(path: &Path) -> serde_json::Value {
    let text = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&text).unwrap()
}

const PASSING_CATALOG: &str = "\
ip,scenario,country,city
8.8.8.8,Valid IP,United States,Mountain View
999.999.999.999,Invalid IP,,
   ,Empty IP Input,,
";

/// Mocks for the three-case passing catalog: one record, two refusals.
fn mount_passing_mocks(
    server: &MockServer,
) -> (httpmock::Mock<'_>, httpmock::Mock<'_>, httpmock::Mock<'_>) {
    let google = server.mock(|when, then| {
        when.method(GET).path("/8.8.8.8");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(serde_json::json!({
                "ip": "8.8.8.8",
                "success": true,
                "country": "United States",
                "city": "Mountain View",
                "latitude": 37.386,
                "longitude": -122.0838,
            }));
    });
    let malformed = server.mock(|when, then| {
        when.method(GET).path("/999.999.999.999");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(serde_json::json!({
                "success": false,
                "message": "999.999.999.999 is an invalid IP address",
            }));
    });
    let empty = server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(serde_json::json!({
                "success": false,
                "message": "IP address is required",
            }));
    });
    (google, malformed, empty)
}

// ── run: happy path ──────────────────────────────────────────────────────────

#[test]
fn test_run_all_passing_exits_0() {
    let server = MockServer::start();
    let (google, malformed, empty) = mount_passing_mocks(&server);

    let dir = tempfile::tempdir().unwrap();
    let config = write_suite(dir.path(), PASSING_CATALOG, Some(&server.base_url()), false);
    let report_path = dir.path().join("report.json");

    let output = gprobe()
        .args([
            "run",
            config.to_str().unwrap(),
            "--output",
            report_path.to_str().unwrap(),
        ])
        .output()
        .expect("failed to run gprobe");

    assert_eq!(
        output.status.code(),
        Some(0),
        "expected exit 0, got {:?}\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr),
    );

    google.assert();
    malformed.assert();
    empty.assert();

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("suite 'binary smoke': 3 case(s), 3 passed, 0 failed, 0 skipped"),
        "stderr: {stderr}",
    );
    assert!(stderr.contains("'8.8.8.8': passed ("), "stderr: {stderr}");

    let report = read_report(&report_path);
    assert_eq!(report["meta"]["suite"], "binary smoke");
    assert_eq!(report["meta"]["base_url"], server.base_url());
    assert_eq!(report["summary"]["total"], 3);
    assert_eq!(report["summary"]["passed"], 3);
    assert_eq!(report["cases"][0]["scenario"], "valid ip");
    assert_eq!(report["cases"][0]["outcome"]["status"], "passed");
    assert_eq!(report["cases"][1]["scenario"], "invalid ip");
    assert_eq!(report["cases"][2]["scenario"], "empty ip input");
    // Raw catalog cell survives into the report even though the case ran with ""
    assert_eq!(report["cases"][2]["row"]["ip"], "   ");
}

#[test]
fn test_run_mismatch_exits_1() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/8.8.8.8");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(serde_json::json!({
                "success": true,
                "country": "United States",
            }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/9.9.9.9");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(serde_json::json!({
                "success": true,
                "country": "Germany",
            }));
    });

    let catalog = "\
ip,scenario,country
8.8.8.8,Valid IP,United States
9.9.9.9,Valid IP,France
";
    let dir = tempfile::tempdir().unwrap();
    let config = write_suite(dir.path(), catalog, Some(&server.base_url()), false);
    let report_path = dir.path().join("report.json");

    let output = gprobe()
        .args([
            "run",
            config.to_str().unwrap(),
            "--output",
            report_path.to_str().unwrap(),
        ])
        .output()
        .expect("failed to run gprobe");

    assert_eq!(
        output.status.code(),
        Some(1),
        "expected exit 1, got {:?}\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr),
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: 1 of 2 case(s) failed"), "stderr: {stderr}");

    let report = read_report(&report_path);
    assert_eq!(report["summary"]["passed"], 1);
    assert_eq!(report["summary"]["failed"], 1);

    let failed = &report["cases"][1];
    assert_eq!(failed["outcome"]["status"], "failed");
    let message = failed["outcome"]["message"].as_str().unwrap();
    assert!(message.starts_with("[valid ip]"), "message: {message}");
    assert_eq!(failed["outcome"]["mismatches"][0]["field"], "country");
    assert_eq!(failed["outcome"]["mismatches"][0]["expected"], "France");
    assert_eq!(failed["outcome"]["mismatches"][0]["actual"], "Germany");
}

#[test]
fn test_unknown_scenario_is_fetched_then_skipped() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/203.0.113.7");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(serde_json::json!({
                "success": true,
                "country": "Norway",
            }));
    });

    let catalog = "\
ip,scenario,country
203.0.113.7,Teleport Drift,Norway
";
    let dir = tempfile::tempdir().unwrap();
    let config = write_suite(dir.path(), catalog, Some(&server.base_url()), false);
    let report_path = dir.path().join("report.json");

    let output = gprobe()
        .args([
            "run",
            config.to_str().unwrap(),
            "--output",
            report_path.to_str().unwrap(),
        ])
        .output()
        .expect("failed to run gprobe");

    // Skips never fail a run, but the lookup must still have happened
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr),
    );
    mock.assert();

    let report = read_report(&report_path);
    assert_eq!(report["summary"]["skipped"], 1);
    assert_eq!(report["cases"][0]["outcome"]["status"], "skipped");
    assert_eq!(
        report["cases"][0]["outcome"]["reason"],
        "scenario 'teleport drift' not handled yet",
    );
}

#[test]
fn test_env_base_url_when_config_silent() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/8.8.8.8");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(serde_json::json!({
                "success": true,
                "country": "United States",
            }));
    });

    let catalog = "\
ip,scenario,country
8.8.8.8,Valid IP,United States
";
    let dir = tempfile::tempdir().unwrap();
    let config = write_suite(dir.path(), catalog, None, false);

    let output = gprobe()
        .env("API_BASE_URL", server.base_url())
        .args(["run", config.to_str().unwrap(), "--quiet"])
        .output()
        .expect("failed to run gprobe");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr),
    );
    mock.assert();
}

#[test]
fn test_json_flag_prints_report_on_stdout() {
    let server = MockServer::start();
    mount_passing_mocks(&server);

    let dir = tempfile::tempdir().unwrap();
    let config = write_suite(dir.path(), PASSING_CATALOG, Some(&server.base_url()), false);

    let output = gprobe()
        .args(["run", config.to_str().unwrap(), "--json", "--quiet"])
        .output()
        .expect("failed to run gprobe");

    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let report: serde_json::Value = serde_json::from_str(&stdout).expect("stdout is the report");
    assert_eq!(report["summary"]["total"], 3);

    // --quiet drops per-case progress; the one-line summary stays
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains(": passed ("), "stderr: {stderr}");
    assert!(stderr.contains("suite 'binary smoke':"), "stderr: {stderr}");
}

#[test]
fn test_run_writes_log_file() {
    let server = MockServer::start();
    mount_passing_mocks(&server);

    let dir = tempfile::tempdir().unwrap();
    let config = write_suite(dir.path(), PASSING_CATALOG, Some(&server.base_url()), true);

    let output = gprobe()
        .args(["run", config.to_str().unwrap(), "--quiet"])
        .output()
        .expect("failed to run gprobe");
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr),
    );

    let log_text = std::fs::read_to_string(dir.path().join("run.log")).unwrap();
    let lines: Vec<&str> = log_text.lines().collect();

    assert!(
        lines.first().unwrap().ends_with("suite started: 3 case(s)"),
        "first line: {:?}",
        lines.first(),
    );
    assert!(
        lines
            .last()
            .unwrap()
            .ends_with("suite finished: 3 passed, 0 failed, 0 skipped"),
        "last line: {:?}",
        lines.last(),
    );
    for line in &lines {
        let parts: Vec<&str> = line.splitn(3, " | ").collect();
        assert_eq!(parts.len(), 3, "bad log line: {line}");
        assert!(
            matches!(parts[1], "INFO" | "WARNING" | "ERROR"),
            "bad level: {line}",
        );
    }
    // Both refusals surface as warnings even though their cases pass
    assert!(
        lines
            .iter()
            .any(|l| l.contains("WARNING | [invalid ip] lookup refused for IP '999.999.999.999'")),
        "log: {log_text}",
    );
}

// ── run: startup failures ────────────────────────────────────────────────────

#[test]
fn test_missing_catalog_exits_3() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("suite.toml");
    std::fs::write(
        &config,
        "name = \"binary smoke\"\ncatalog = \"nope.csv\"\nbase_url = \"http://127.0.0.1:9\"\n",
    )
    .unwrap();

    let output = gprobe()
        .args(["run", config.to_str().unwrap()])
        .output()
        .expect("failed to run gprobe");

    assert_eq!(
        output.status.code(),
        Some(3),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr),
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot read catalog"), "stderr: {stderr}");
    assert!(
        stderr.contains("hint:  catalog paths are resolved relative to the config file"),
        "stderr: {stderr}",
    );
}

#[test]
fn test_invalid_config_exits_3() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("suite.toml");
    std::fs::write(
        &config,
        "name = \"binary smoke\"\ncatalog = \"catalog.csv\"\ntimeout_secs = 0\n",
    )
    .unwrap();

    let output = gprobe()
        .args(["run", config.to_str().unwrap()])
        .output()
        .expect("failed to run gprobe");

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config validation error"), "stderr: {stderr}");
}

// ── validate / scenarios / usage ─────────────────────────────────────────────

#[test]
fn test_validate_previews_unknown_scenarios() {
    let catalog = "\
ip,scenario,country
8.8.8.8,Valid IP,United States
1.2.3.4,Teleport Drift,
5.6.7.8,teleport drift,
";
    let dir = tempfile::tempdir().unwrap();
    // Unroutable base URL: validate must never touch the network
    let config = write_suite(dir.path(), catalog, Some("http://127.0.0.1:9"), false);

    let output = gprobe()
        .args(["validate", config.to_str().unwrap()])
        .output()
        .expect("failed to run gprobe");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr),
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("valid: suite 'binary smoke' with 3 case(s)"),
        "stderr: {stderr}",
    );
    // The two spellings collapse into one normalized key
    assert!(
        stderr.contains("1 scenario key(s) not in the registry"),
        "stderr: {stderr}",
    );
    assert!(stderr.contains("teleport drift"), "stderr: {stderr}");
}

#[test]
fn test_scenarios_lists_registry_keys() {
    let output = gprobe().arg("scenarios").output().expect("failed to run gprobe");
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let printed: Vec<&str> = stdout.lines().collect();
    let expected: Vec<&str> = geoprobe_engine::ScenarioRegistry::keys().collect();
    assert_eq!(printed, expected);
}

#[test]
fn test_missing_args_exit_2() {
    let output = gprobe().arg("run").output().expect("failed to run gprobe");
    assert_eq!(output.status.code(), Some(2));

    let output = gprobe().output().expect("failed to run gprobe");
    assert_eq!(output.status.code(), Some(2));
}
