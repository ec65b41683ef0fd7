//! Error types for the fieldkit-core library.

use thiserror::Error;

/// Main error type for the fieldkit library.
///
/// Data problems (no pattern matched, a date did not parse) are not errors;
/// handlers report them as absent values. Only misconfiguration surfaces here.
#[derive(Error, Debug)]
pub enum FieldError {
    /// No handler is registered for the requested type tag.
    #[error("unknown field type: {0}")]
    UnknownType(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file is not valid JSON for the expected schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A configuration value is out of range.
    #[error("invalid value for {field}: {reason}")]
    Invalid { field: String, reason: String },
}

/// Result type for the fieldkit library.
pub type Result<T> = std::result::Result<T, FieldError>;
