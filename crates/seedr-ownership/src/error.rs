//! Internal error type. Never surfaced through the public
//! [`seedr_core::OwnershipRegistry`] trait: every public operation
//! collapses failures into `Unknown`/no-op and logs here instead.

use thiserror::Error;

/// Failures talking to the ownership registry's backing store.
#[derive(Debug, Error)]
pub enum OwnershipError {
    /// Connecting to the registry failed or timed out.
    #[error("ownership registry connect failed")]
    Connect {
        /// Underlying redis error.
        #[source]
        source: redis::RedisError,
    },
    /// A command against the registry timed out.
    #[error("ownership registry command timed out")]
    Timeout {
        /// Command name issued.
        operation: &'static str,
    },
    /// A command against the registry failed.
    #[error("ownership registry command failed")]
    Command {
        /// Command name issued.
        operation: &'static str,
        /// Underlying redis error.
        #[source]
        source: redis::RedisError,
    },
}
