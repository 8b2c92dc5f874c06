use std::fmt;

/// Severity of a suite log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logging capability handed to the orchestrator. The sink's lifecycle
/// (open, flush, close) belongs to the harness, not the engine. Lines must
/// land atomically; implementations take `&self` and synchronize internally.
pub trait SuiteLog: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);
}

/// Sink that drops everything.
#[derive(Debug, Default)]
pub struct NullLog;

impl SuiteLog for NullLog {
    fn log(&self, _level: LogLevel, _message: &str) {}
}
