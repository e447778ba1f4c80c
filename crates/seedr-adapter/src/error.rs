//! Errors that can occur while wiring the adapter's collaborators together.
//! Once [`crate::SeedrAdapter::build`] returns `Ok`, individual operations
//! report through [`seedr_core::ReconcileError`] instead.

use thiserror::Error;

/// Failures building a [`crate::SeedrAdapter`] from configuration.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Constructing the HTTP client for the cloud API proxy failed.
    #[error("failed to build seedr cloud client")]
    CloudClient {
        /// Underlying cloud error.
        #[source]
        source: seedr_core::CloudError,
    },
    /// Connecting to the ownership registry's backing store failed.
    #[error("failed to connect to the ownership registry")]
    OwnershipRegistry {
        /// Underlying ownership error.
        #[source]
        source: seedr_ownership::OwnershipError,
    },
}
