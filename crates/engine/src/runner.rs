//! Suite orchestration: one lookup per case, dispatched through the scenario
//! registry.
//!
//! Per-case state machine: loaded -> fetched -> validated pass/fail, with
//! two short-circuits: a transport failure hard-fails the case (no data, no
//! retry), and an unknown scenario skips it. Cases are isolated; nothing a
//! case does can abort the rest of the suite.

use std::time::Instant;

use crate::log::{LogLevel, SuiteLog};
use crate::model::{CaseOutcome, CaseReport, LookupError, LookupResponse, TestCase};
use crate::registry::{normalize_key, ScenarioRegistry};

/// External lookup capability. Implementations make exactly one attempt per
/// call; the engine never retries.
pub trait GeoLookup {
    fn lookup(&self, ip: &str) -> Result<LookupResponse, LookupError>;
}

/// Drives cases through the state machine. Holds its collaborators by
/// capability: the lookup client, the registry, and the log sink.
pub struct Orchestrator<'a> {
    lookup: &'a dyn GeoLookup,
    registry: &'a ScenarioRegistry,
    log: &'a dyn SuiteLog,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        lookup: &'a dyn GeoLookup,
        registry: &'a ScenarioRegistry,
        log: &'a dyn SuiteLog,
    ) -> Self {
        Self {
            lookup,
            registry,
            log,
        }
    }

    /// Run one case: a single lookup attempt, then the scenario's validator.
    pub fn run_case(&self, case: &TestCase) -> CaseReport {
        let key = normalize_key(&case.scenario);
        let started = Instant::now();

        self.log
            .log(LogLevel::Info, &format!("[{key}] testing IP '{}'", case.ip));

        let outcome = self.decide(&key, case);

        match &outcome {
            CaseOutcome::Passed => self.log.log(LogLevel::Info, &format!("[{key}] passed")),
            CaseOutcome::Failed { message, .. } => self.log.log(LogLevel::Error, message),
            CaseOutcome::Skipped { reason } => self.log.log(LogLevel::Warning, reason),
        }

        CaseReport {
            scenario: key,
            ip: case.ip.clone(),
            outcome,
            duration_ms: started.elapsed().as_millis() as u64,
            row: case.row.clone(),
        }
    }

    /// Run every case in catalog order.
    pub fn run_suite(&self, cases: &[TestCase]) -> Vec<CaseReport> {
        self.log.log(
            LogLevel::Info,
            &format!("suite started: {} case(s)", cases.len()),
        );

        let reports: Vec<CaseReport> = cases.iter().map(|case| self.run_case(case)).collect();

        let summary = crate::report::compute_summary(&reports);
        self.log.log(
            LogLevel::Info,
            &format!(
                "suite finished: {} passed, {} failed, {} skipped",
                summary.passed, summary.failed, summary.skipped
            ),
        );
        reports
    }

    fn decide(&self, key: &str, case: &TestCase) -> CaseOutcome {
        // Fetch before consulting the registry: a dead upstream should
        // surface even for scenarios the registry does not know.
        let response = match self.lookup.lookup(&case.ip) {
            Ok(response) => response,
            Err(err) => {
                return CaseOutcome::Failed {
                    message: format!(
                        "[{key}] no data returned for IP '{}': {}",
                        case.ip, err.reason
                    ),
                    mismatches: Vec::new(),
                }
            }
        };

        if let LookupResponse::Refused { message } = &response {
            self.log.log(
                LogLevel::Warning,
                &format!("[{key}] lookup refused for IP '{}': {message}", case.ip),
            );
        }

        let validator = match self.registry.lookup(key) {
            Some(validator) => validator,
            None => {
                return CaseOutcome::Skipped {
                    reason: format!("scenario '{key}' not handled yet"),
                }
            }
        };

        match validator.validate(&response, case) {
            Ok(()) => CaseOutcome::Passed,
            Err(failure) => CaseOutcome::Failed {
                message: format!("[{key}] {}", failure.message),
                mismatches: failure.mismatches,
            },
        }
    }
}
