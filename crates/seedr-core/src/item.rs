//! The uniform item view emitted by `GetItems`.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a single emitted item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// Still ingesting on the cloud, or still copying locally.
    Downloading,
    /// Local payload is complete and ready to import.
    Completed,
    /// Degraded but not fatal (e.g. quota near limit, registry unreachable).
    Warning,
}

/// One element of the list returned by `GetItems`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadClientItem {
    /// Canonical download id (the info-hash, or `seedr-<id>`).
    pub download_id: String,
    /// Display title.
    pub title: String,
    /// Declared total size in bytes.
    pub total_size: u64,
    /// Bytes remaining to be transferred (cloud ingest or local copy).
    pub remaining_size: u64,
    /// Estimated seconds remaining, when derivable from progress history.
    pub remaining_time: Option<i64>,
    /// Current lifecycle status.
    pub status: ItemStatus,
    /// Optional human-readable status message.
    pub message: Option<String>,
    /// Local output path, set once the item is `Completed`.
    pub output_path: Option<String>,
    /// Whether the surrounding pipeline may move the completed files.
    pub can_move_files: bool,
    /// Whether the item may be removed.
    pub can_be_removed: bool,
}

impl DownloadClientItem {
    /// Whether this item satisfies the `Completed` invariants: zero
    /// remaining size and a non-empty output path.
    #[must_use]
    pub fn is_well_formed_completed(&self) -> bool {
        self.status != ItemStatus::Completed
            || (self.remaining_size == 0 && self.output_path.is_some())
    }
}
