//! Errors produced while loading and validating adapter configuration.

use thiserror::Error;

/// Failures building an [`crate::AdapterConfig`] from raw settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required setting was absent.
    #[error("missing required setting '{name}'")]
    Missing {
        /// The setting's key.
        name: &'static str,
    },
    /// A boolean setting held a value other than `true`/`false`.
    #[error("setting '{name}' must be 'true' or 'false', got '{value}'")]
    InvalidBool {
        /// The setting's key.
        name: &'static str,
        /// The raw value that failed to parse.
        value: String,
    },
    /// `sharedAccount` is enabled but `instanceTag` is missing.
    #[error("'instanceTag' is required when 'sharedAccount' is enabled")]
    MissingInstanceTag,
    /// `instanceTag` contained characters outside `[A-Za-z0-9_-]+`.
    #[error("'instanceTag' value '{value}' does not match [A-Za-z0-9_-]+")]
    InvalidInstanceTag {
        /// The offending raw value.
        value: String,
    },
}
