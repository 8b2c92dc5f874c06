//! `gprobe run` / `validate` / `scenarios` — suite execution and offline checks.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use geoprobe_client::GeoClient;
use geoprobe_engine::registry::normalize_key;
use geoprobe_engine::{
    build_report, load_catalog, CaseOutcome, CaseReport, NullLog, Orchestrator, ScenarioRegistry,
    SuiteConfig, SuiteLog, TestCase,
};

use geoprobe_cli::exit_codes::EXIT_CASE_FAILURES;
use geoprobe_cli::runlog::RunLog;

use crate::CliError;

/// Config plus the catalog it names. Relative paths in the config are
/// resolved against the config file's directory.
struct LoadedSuite {
    config: SuiteConfig,
    cases: Vec<TestCase>,
    base_dir: PathBuf,
}

fn load_suite(config_path: &Path) -> Result<LoadedSuite, CliError> {
    let config_str = std::fs::read_to_string(config_path)
        .map_err(|e| CliError::config(format!("cannot read config: {e}")))?;

    let config =
        SuiteConfig::from_toml(&config_str).map_err(|e| CliError::config(e.to_string()))?;

    let base_dir = config_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();

    let catalog_path = base_dir.join(&config.catalog);
    let catalog_str = std::fs::read_to_string(&catalog_path).map_err(|e| {
        CliError::config(format!(
            "cannot read catalog {}: {e}",
            catalog_path.display()
        ))
        .with_hint("catalog paths are resolved relative to the config file")
    })?;

    let cases = load_catalog(&catalog_str).map_err(|e| CliError::config(e.to_string()))?;

    Ok(LoadedSuite {
        config,
        cases,
        base_dir,
    })
}

/// Config wins, then the `API_BASE_URL` environment variable, then the
/// client's built-in default.
fn resolve_base_url(config: &SuiteConfig, env_value: Option<String>) -> String {
    config
        .base_url
        .clone()
        .or(env_value.filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| geoprobe_client::DEFAULT_BASE_URL.to_string())
}

fn print_case_line(case: &CaseReport) {
    match &case.outcome {
        CaseOutcome::Passed => {
            eprintln!("  '{}': passed ({}ms)", case.ip, case.duration_ms);
        }
        CaseOutcome::Failed { message, .. } => {
            eprintln!(
                "  '{}': failed ({}ms): {}",
                case.ip, case.duration_ms, message
            );
        }
        CaseOutcome::Skipped { reason } => {
            eprintln!(
                "  '{}': skipped ({}ms): {}",
                case.ip, case.duration_ms, reason
            );
        }
    }
}

pub fn cmd_run(
    config_path: PathBuf,
    json_output: bool,
    output_file: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let suite = load_suite(&config_path)?;
    let base_url = resolve_base_url(&suite.config, std::env::var("API_BASE_URL").ok());

    let client = GeoClient::with_timeout(
        &base_url,
        Duration::from_secs(suite.config.timeout_secs),
    );
    let registry = ScenarioRegistry::new();

    let log: Box<dyn SuiteLog> = match &suite.config.log_file {
        Some(rel) => {
            let path = suite.base_dir.join(rel);
            let run_log = RunLog::create(&path).map_err(|e| {
                CliError::io(format!("cannot create log file {}: {e}", path.display()))
            })?;
            Box::new(run_log)
        }
        None => Box::new(NullLog),
    };

    let orchestrator = Orchestrator::new(&client, &registry, log.as_ref());
    let reports = orchestrator.run_suite(&suite.cases);

    if !quiet {
        for case in &reports {
            print_case_line(case);
        }
    }

    let report = build_report(&suite.config.name, &base_url, reports);

    let json_str = serde_json::to_string_pretty(&report)
        .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))?;

    if let Some(ref path) = output_file {
        std::fs::write(path, &json_str)
            .map_err(|e| CliError::io(format!("cannot write report: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{json_str}");
    }

    let s = &report.summary;
    eprintln!(
        "suite '{}': {} case(s), {} passed, {} failed, {} skipped",
        report.meta.suite, s.total, s.passed, s.failed, s.skipped,
    );

    if s.failed > 0 {
        return Err(CliError {
            code: EXIT_CASE_FAILURES,
            message: format!("{} of {} case(s) failed", s.failed, s.total),
            hint: None,
        });
    }

    Ok(())
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let suite = load_suite(&config_path)?;
    let registry = ScenarioRegistry::new();

    let mut unknown: Vec<String> = suite
        .cases
        .iter()
        .filter(|case| !registry.contains(&case.scenario))
        .map(|case| normalize_key(&case.scenario))
        .collect();
    unknown.sort_unstable();
    unknown.dedup();

    eprintln!(
        "valid: suite '{}' with {} case(s)",
        suite.config.name,
        suite.cases.len(),
    );

    if !unknown.is_empty() {
        eprintln!(
            "{} scenario key(s) not in the registry; their cases will be skipped:",
            unknown.len(),
        );
        for key in unknown {
            eprintln!("  {key}");
        }
    }

    Ok(())
}

pub fn cmd_scenarios() -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    for key in ScenarioRegistry::keys() {
        writeln!(handle, "{}", key).map_err(|e| CliError::io(e.to_string()))?;
    }

    Ok(())
}
