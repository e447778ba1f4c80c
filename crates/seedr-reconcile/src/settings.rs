//! The subset of adapter configuration the reconciler needs directly.
//! Constructed by `seedr-adapter` from the full typed configuration;
//! kept separate here so this crate has no dependency on the
//! configuration crate's env-loading concerns.

use std::path::PathBuf;

/// Settings the reconciliation engine consults on every poll.
#[derive(Debug, Clone)]
pub struct ReconcilerSettings {
    /// Local target root for completed downloads.
    pub download_directory: PathBuf,
    /// Whether `MarkItemAsImported` deletes cloud state.
    pub delete_from_cloud: bool,
    /// Whether multi-instance ownership logic is enabled.
    pub shared_account: bool,
    /// Whether a real ownership registry backend is wired in (as opposed to
    /// the no-op fallback). Drives the "shared account on, no registry"
    /// warning in `Test`.
    pub registry_configured: bool,
}
