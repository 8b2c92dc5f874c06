//! `geoprobe-cli` — library surface backing the `gprobe` binary.
//!
//! Command wiring lives in `main.rs`. The pieces with behavior worth testing
//! on their own sit here: the exit code registry and the run log sink.

pub mod exit_codes;
pub mod runlog;
