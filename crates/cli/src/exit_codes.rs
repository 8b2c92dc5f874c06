//! CLI Exit Code Registry
//!
//! This is the single source of truth for `gprobe` exit codes.
//! Exit codes are part of the shell contract; CI scripts rely on them.
//!
//! # Exit Codes
//!
//! | Code | Meaning                                                |
//! |------|--------------------------------------------------------|
//! | 0    | Success (every case passed or was skipped)             |
//! | 1    | One or more cases failed validation                    |
//! | 2    | Usage error (bad arguments; emitted by clap)           |
//! | 3    | Invalid config or catalog (fatal before any lookup)    |
//! | 4    | Runtime I/O error (report or log file)                 |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant below
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success. Skipped cases do not fail a run.
pub const EXIT_SUCCESS: u8 = 0;

/// One or more cases failed validation.
/// Like `diff(1)`, exit 1 means "expectations differ."
pub const EXIT_CASE_FAILURES: u8 = 1;

/// Usage error: bad arguments, unknown subcommand. Emitted by clap itself.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Startup (3)
// =============================================================================

/// Config or catalog rejected before any lookup ran: unreadable file,
/// TOML/CSV parse error, failed validation.
pub const EXIT_CONFIG: u8 = 3;

// =============================================================================
// Runtime (4)
// =============================================================================

/// The report or run log could not be written.
pub const EXIT_RUNTIME: u8 = 4;
