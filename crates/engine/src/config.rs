//! Suite configuration: the TOML file handed to `run` / `validate`.

use serde::Deserialize;

use crate::error::LoadError;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// A suite description. Relative paths are resolved against the config
/// file's directory by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct SuiteConfig {
    pub name: String,
    /// Path to the case catalog CSV.
    pub catalog: String,
    /// Lookup API base URL. When absent the harness falls back to the
    /// API_BASE_URL environment variable, then the built-in default.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Run log path; absent disables the file log.
    #[serde(default)]
    pub log_file: Option<String>,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl SuiteConfig {
    pub fn from_toml(text: &str) -> Result<Self, LoadError> {
        let config: SuiteConfig =
            toml::from_str(text).map_err(|e| LoadError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), LoadError> {
        if self.name.trim().is_empty() {
            return Err(LoadError::ConfigValidation("name must not be empty".into()));
        }
        if self.catalog.trim().is_empty() {
            return Err(LoadError::ConfigValidation(
                "catalog must not be empty".into(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(LoadError::ConfigValidation(
                "timeout_secs must be at least 1".into(),
            ));
        }
        if let Some(url) = &self.base_url {
            if url.trim().is_empty() {
                return Err(LoadError::ConfigValidation(
                    "base_url must not be empty when set".into(),
                ));
            }
        }
        Ok(())
    }
}
