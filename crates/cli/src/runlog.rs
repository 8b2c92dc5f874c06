//! Run log sink: the file a suite writes while it executes.
//!
//! Created fresh per run (`File::create` truncates any previous log). One
//! line per event, written atomically behind a mutex. Write failures are
//! swallowed: losing a log line must never abort the suite.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use geoprobe_engine::{LogLevel, SuiteLog};

pub struct RunLog {
    file: Mutex<File>,
}

impl RunLog {
    /// Open the log at `path`, truncating an existing file.
    pub fn create(path: &Path) -> std::io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl SuiteLog for RunLog {
    fn log(&self, level: LogLevel, message: &str) {
        let stamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let mut file = match self.file.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let _ = writeln!(file, "{stamp} | {} | {message}", level.as_str());
        let _ = file.flush();
    }
}
