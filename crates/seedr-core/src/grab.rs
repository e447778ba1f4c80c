//! The minimal shape this adapter needs from the external grab-history
//! service, consumed through [`crate::traits::GrabHistorySource`].

use serde::{Deserialize, Serialize};

/// One historical grab recorded against this adapter instance.
#[derive(Debug, Clone, PartialEq)]
pub struct GrabRecord {
    /// The download id the surrounding system used to track this grab
    /// (matches [`crate::mapping::DownloadMapping::info_hash`]).
    pub download_id: String,
    /// The Seedr display name recorded at grab time.
    pub seedr_name: String,
    /// The Seedr transfer id recorded at grab time, when known.
    pub seedr_transfer_id: Option<i64>,
    /// Whether the surrounding pipeline has already imported this grab.
    pub imported: bool,
}

/// Returned by `GrabMetadata` so the external history pipeline can rebuild a
/// mapping after a process restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrabMetadata {
    /// Seedr display name recorded at grab time.
    #[serde(rename = "SeedrName")]
    pub seedr_name: String,
    /// Seedr transfer id recorded at grab time, when known.
    #[serde(rename = "SeedrTransferId")]
    pub seedr_transfer_id: Option<i64>,
}
