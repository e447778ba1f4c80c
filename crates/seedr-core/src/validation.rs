//! Field-scoped validation results produced by `Test`.

use serde::{Deserialize, Serialize};

/// Which configured field a validation failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationField {
    /// The Seedr account (email/password/quota).
    Email,
    /// The local download directory.
    DownloadDirectory,
    /// The ownership registry connection.
    Redis,
}

/// Severity of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationSeverity {
    /// Degraded but operable.
    Warning,
    /// Not operable until fixed.
    Error,
}

/// A single failure surfaced by `Test`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationFailure {
    /// The field this failure is attributed to.
    pub field: ValidationField,
    /// Warning or error.
    pub severity: ValidationSeverity,
    /// Human-readable explanation.
    pub message: String,
}

impl ValidationFailure {
    /// Build an error-severity failure.
    #[must_use]
    pub fn error(field: ValidationField, message: impl Into<String>) -> Self {
        Self {
            field,
            severity: ValidationSeverity::Error,
            message: message.into(),
        }
    }

    /// Build a warning-severity failure.
    #[must_use]
    pub fn warning(field: ValidationField, message: impl Into<String>) -> Self {
        Self {
            field,
            severity: ValidationSeverity::Warning,
            message: message.into(),
        }
    }
}
