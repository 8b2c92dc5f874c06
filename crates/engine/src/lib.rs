//! `geoprobe-engine` — Scenario-driven validation engine for geolocation lookups.
//!
//! Pure engine crate: receives pre-loaded test cases and lookup responses,
//! returns classified outcomes. No CLI or network dependencies.

pub mod catalog;
pub mod compare;
pub mod config;
pub mod error;
pub mod log;
pub mod model;
pub mod registry;
pub mod report;
pub mod runner;
pub mod validator;

pub use catalog::load_catalog;
pub use config::SuiteConfig;
pub use error::LoadError;
pub use log::{LogLevel, NullLog, SuiteLog};
pub use model::{CaseOutcome, CaseReport, LookupResponse, SuiteReport, TestCase};
pub use registry::{Scenario, ScenarioRegistry};
pub use report::{build_report, compute_summary};
pub use runner::{GeoLookup, Orchestrator};
