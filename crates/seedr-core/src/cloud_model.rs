//! Normalised cloud inventory shapes. Everything above the cloud proxy only
//! ever sees these types: the proxy absorbs Seedr's protocol quirks
//! (`torrents` vs `transfers`, `user_torrent_id` vs `id`, string progress).

use serde::{Deserialize, Serialize};

/// A cloud-side upload in progress. Becomes a [`FolderEntry`] (multi-file)
/// or a [`FileEntry`] (single-file) once Seedr finishes assembling it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferEntry {
    /// Cloud transfer id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Declared total size in bytes.
    pub size: u64,
    /// Ingest progress, 0-100.
    pub progress: f64,
    /// BitTorrent info-hash, when Seedr has extracted one.
    pub hash: Option<String>,
}

/// An assembled cloud folder (multi-file torrent result).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderEntry {
    /// Cloud folder id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Declared total size in bytes.
    pub size: u64,
}

/// An assembled cloud file (single-file torrent result).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Cloud file id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Declared size in bytes.
    pub size: u64,
}

/// A single, immutable point-in-time view of the cloud account's root (or a
/// specific folder's) contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CloudInventorySnapshot {
    /// In-flight transfers.
    pub transfers: Vec<TransferEntry>,
    /// Assembled folders.
    pub folders: Vec<FolderEntry>,
    /// Assembled single files.
    pub files: Vec<FileEntry>,
}

impl CloudInventorySnapshot {
    /// Sum of the sizes of this snapshot's direct folder and file children
    /// (used by the readiness check; transfers are not children of
    /// themselves).
    #[must_use]
    pub fn children_bytes(&self) -> u64 {
        let folder_bytes: u64 = self.folders.iter().map(|f| f.size).sum();
        let file_bytes: u64 = self.files.iter().map(|f| f.size).sum();
        folder_bytes + file_bytes
    }

    /// Number of direct children (folders + files) in this snapshot.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.folders.len() + self.files.len()
    }
}

/// Result of adding a magnet or torrent file to the cloud account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddedTransfer {
    /// Cloud transfer id assigned to the new upload.
    pub id: i64,
    /// Display name Seedr assigned (or echoed back).
    pub name: String,
    /// BitTorrent info-hash, when Seedr extracted one immediately.
    pub hash: Option<String>,
}

/// Seedr account summary returned by `GetUser`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedrUser {
    /// Account email.
    pub email: String,
    /// Bytes currently used.
    pub space_used: u64,
    /// Total byte quota (0 means unlimited / not reported).
    pub space_max: u64,
}
