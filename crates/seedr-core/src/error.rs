//! Error types shared across the Seedr adapter crates.

use std::error::Error;

use thiserror::Error;

/// Errors raised by the Seedr cloud API proxy.
///
/// # Design
/// Messages are constant; operational context (status codes, paths, ids)
/// lives in the fields so callers can log or match on it without parsing
/// strings.
#[derive(Debug, Error)]
pub enum CloudError {
    /// HTTP 401/403 from the Seedr API.
    #[error("seedr authentication failed")]
    AuthFailure,
    /// HTTP 429.
    #[error("seedr rate limit exceeded")]
    RateLimited,
    /// HTTP 5xx.
    #[error("seedr server error")]
    ServerError {
        /// Status code returned by the server.
        status: u16,
    },
    /// HTTP 404, or a delete/lookup against an id the cloud no longer has.
    #[error("seedr resource not found")]
    NotFound,
    /// Network, DNS, or timeout failure before a response was received.
    #[error("seedr transport failure")]
    Transport {
        /// Underlying transport failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// Response body was empty where content was required, or carried
    /// `result != true` in a context that demands success.
    #[error("seedr protocol violation")]
    ProtocolError {
        /// What the proxy was trying to parse.
        operation: &'static str,
    },
    /// Retries for a transient failure were exhausted.
    #[error("seedr retries exhausted")]
    RetriesExhausted {
        /// Number of attempts made before giving up.
        attempts: u32,
        /// The last transient failure observed.
        #[source]
        last: Box<CloudError>,
    },
    /// Local filesystem failure while streaming a download to disk.
    #[error("seedr download io failure")]
    Io {
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl CloudError {
    /// Whether retrying the same request might succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::ServerError { .. } | Self::Transport { .. }
        )
    }
}

/// Result type for cloud proxy operations.
pub type CloudResult<T> = Result<T, CloudError>;

/// Errors produced by the reconciliation engine's public operations.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// An underlying cloud API call failed.
    #[error("seedr cloud call failed")]
    CloudCallFailed {
        /// Underlying cloud error.
        #[source]
        source: CloudError,
    },
    /// A submitted release carried neither a usable magnet URI nor torrent
    /// bytes.
    #[error("release has no usable payload")]
    EmptyRelease,
    /// The referenced mapping does not exist in the store.
    #[error("mapping not found")]
    MappingNotFound {
        /// The download id that was looked up.
        download_id: String,
    },
}

/// Result type for reconciliation operations.
pub type ReconcileResult<T> = Result<T, ReconcileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_and_server_and_transport_errors_are_transient() {
        assert!(CloudError::RateLimited.is_transient());
        assert!(CloudError::ServerError { status: 503 }.is_transient());
        assert!(CloudError::Transport {
            source: Box::new(std::io::Error::other("boom"))
        }
        .is_transient());
    }

    #[test]
    fn auth_and_not_found_and_protocol_errors_are_not_transient() {
        assert!(!CloudError::AuthFailure.is_transient());
        assert!(!CloudError::NotFound.is_transient());
        assert!(!CloudError::ProtocolError { operation: "parse" }.is_transient());
        assert!(!CloudError::RetriesExhausted {
            attempts: 3,
            last: Box::new(CloudError::RateLimited),
        }
        .is_transient());
    }
}
