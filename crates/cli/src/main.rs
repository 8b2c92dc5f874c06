// GeoProbe CLI - scenario-driven validation suites for IP geolocation APIs

mod run;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use geoprobe_cli::exit_codes::{EXIT_CONFIG, EXIT_RUNTIME, EXIT_SUCCESS};

#[derive(Parser)]
#[command(name = "gprobe")]
#[command(about = "Scenario-driven validation suites for IP geolocation APIs")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a validation suite from a TOML config file
    #[command(after_help = "\
Examples:
  gprobe run suite.toml
  gprobe run suite.toml --json
  gprobe run suite.toml --output report.json
  gprobe run suite.toml --quiet --output report.json")]
    Run {
        /// Path to the suite .toml config file
        config: PathBuf,

        /// Output the JSON report to stdout
        #[arg(long)]
        json: bool,

        /// Write the JSON report to a file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Suppress per-case progress on stderr
        #[arg(long)]
        quiet: bool,
    },

    /// Validate a suite config and catalog without any lookups
    #[command(after_help = "\
Examples:
  gprobe validate suite.toml")]
    Validate {
        /// Path to the suite .toml config file
        config: PathBuf,
    },

    /// List the scenario keys the registry understands
    Scenarios,
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nengine:  geoprobe-engine ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   debug",
            "\ntarget:  ", env!("TARGET"),
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nengine:  geoprobe-engine ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   release",
            "\ntarget:  ", env!("TARGET"),
        )
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            config,
            json,
            output,
            quiet,
        } => run::cmd_run(config, json, output, quiet),
        Commands::Validate { config } => run::cmd_validate(config),
        Commands::Scenarios => run::cmd_scenarios(),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError {
            code,
            message,
            hint,
        }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_CONFIG,
            message: msg.into(),
            hint: None,
        }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_RUNTIME,
            message: msg.into(),
            hint: None,
        }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
