//! Errors internal to the fetcher. Never propagated to the reconciliation
//! path: every fetcher error is caught, logged, and recorded on the
//! mapping instead (per the failure-handling rule in the component design).

use thiserror::Error;

/// A single file or folder copy attempt failed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The cloud-supplied name could not be sanitised for local use.
    #[error("fetch name rejected")]
    InvalidName {
        /// Underlying cause.
        #[source]
        source: seedr_fsops::FsOpsError,
    },
    /// The cloud proxy reported a failure while listing or downloading.
    #[error("fetch cloud call failed")]
    Cloud {
        /// Underlying cloud error.
        #[source]
        source: seedr_core::CloudError,
    },
    /// A local filesystem operation failed.
    #[error("fetch io failure")]
    Io {
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The cloud subtree walk produced zero files and zero failures: the
    /// folder is not yet assembled on the cloud, even though readiness
    /// reported otherwise.
    #[error("fetch found an empty cloud subtree")]
    EmptySubtree,
}

impl From<seedr_core::CloudError> for FetchError {
    fn from(source: seedr_core::CloudError) -> Self {
        Self::Cloud { source }
    }
}

impl From<seedr_fsops::FsOpsError> for FetchError {
    fn from(source: seedr_fsops::FsOpsError) -> Self {
        Self::InvalidName { source }
    }
}

impl From<std::io::Error> for FetchError {
    fn from(source: std::io::Error) -> Self {
        Self::Io { source }
    }
}
