use std::fmt;

/// Errors that abort suite startup. Case-local failures never use this type;
/// they live inside the per-case outcome.
#[derive(Debug)]
pub enum LoadError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty name, zero timeout, etc.).
    ConfigValidation(String),
    /// Catalog CSV could not be parsed.
    Csv(String),
    /// Missing required column in the catalog header.
    MissingColumn { column: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::Csv(msg) => write!(f, "catalog parse error: {msg}"),
            Self::MissingColumn { column } => {
                write!(f, "catalog missing required column '{column}'")
            }
        }
    }
}

impl std::error::Error for LoadError {}
