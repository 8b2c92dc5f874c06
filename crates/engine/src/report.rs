//! Suite summary and report assembly.

use crate::model::{CaseOutcome, CaseReport, RunMeta, SuiteReport, SuiteSummary};

/// Count terminal states across case reports.
pub fn compute_summary(reports: &[CaseReport]) -> SuiteSummary {
    let mut passed = 0;
    let mut failed = 0;
    let mut skipped = 0;

    for report in reports {
        match report.outcome {
            CaseOutcome::Passed => passed += 1,
            CaseOutcome::Failed { .. } => failed += 1,
            CaseOutcome::Skipped { .. } => skipped += 1,
        }
    }

    SuiteSummary {
        total: reports.len(),
        passed,
        failed,
        skipped,
    }
}

/// Assemble the full run report around the case results.
pub fn build_report(suite: &str, base_url: &str, cases: Vec<CaseReport>) -> SuiteReport {
    let summary = compute_summary(&cases);
    SuiteReport {
        meta: RunMeta {
            suite: suite.to_string(),
            base_url: base_url.to_string(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        cases,
    }
}
