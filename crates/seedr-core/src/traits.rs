//! Trait seams between the reconciliation engine and its collaborators.
//!
//! # Design
//! Every capability the reconciler needs is modelled as a small
//! `async_trait`, matching the dependency-injected shape used throughout
//! this workspace: the reconciler is constructed from already-built
//! `Arc<dyn Trait>` collaborators, never from service location.

use std::path::Path;

use async_trait::async_trait;

use crate::cloud_model::{AddedTransfer, CloudInventorySnapshot, SeedrUser};
use crate::error::CloudResult;
use crate::grab::GrabRecord;
use crate::mapping::DownloadMapping;
use crate::ownership::{OwnershipCheck, ReleaseOutcome};

/// The only component that speaks the remote wire protocol (C1).
#[async_trait]
pub trait CloudClient: Send + Sync {
    /// List the contents of a folder, or the account root when `folder_id`
    /// is `None`.
    async fn get_folder_contents(
        &self,
        folder_id: Option<i64>,
    ) -> CloudResult<CloudInventorySnapshot>;

    /// Add a magnet URI as a new transfer. Not retried (non-idempotent).
    async fn add_magnet(&self, magnet: &str) -> CloudResult<AddedTransfer>;

    /// Add a `.torrent` file as a new transfer. Not retried (non-idempotent).
    async fn add_torrent_file(&self, filename: &str, bytes: &[u8]) -> CloudResult<AddedTransfer>;

    /// Delete a cloud transfer.
    async fn delete_transfer(&self, id: i64) -> CloudResult<()>;

    /// Delete a cloud folder.
    async fn delete_folder(&self, id: i64) -> CloudResult<()>;

    /// Delete a cloud file.
    async fn delete_file(&self, id: i64) -> CloudResult<()>;

    /// Fetch the account summary (email, quota).
    async fn get_user(&self) -> CloudResult<SeedrUser>;

    /// Stream a cloud file to `path`, writing through `path.part` and
    /// renaming atomically on success.
    async fn download_file_to_path(&self, file_id: i64, path: &Path) -> CloudResult<()>;
}

/// Optional shared-account coordination across peer instances (C2).
///
/// All operations degrade to a no-op or [`crate::ownership::OwnershipCheck::Unknown`]
/// / [`crate::ownership::ReleaseOutcome::Unknown`] when multi-tenancy is not
/// configured, and never propagate an error out to the caller.
#[async_trait]
pub trait OwnershipRegistry: Send + Sync {
    /// Add this instance to the ownership set for `info_hash`, refreshing
    /// its TTL. Self-gates on configuration; always safe to call.
    async fn claim_ownership(&self, info_hash: &str);

    /// Whether this instance is a current member of the ownership set.
    async fn is_owned_by_me(&self, info_hash: &str) -> OwnershipCheck;

    /// Atomically remove this instance from the ownership set and report
    /// whether it was the last owner.
    async fn release_ownership(&self, info_hash: &str) -> ReleaseOutcome;

    /// Health probe; `Some(message)` on failure, `None` on success.
    async fn test_connection(&self) -> Option<String>;
}

/// Process-local keyed store of [`DownloadMapping`] records (C3).
#[async_trait]
pub trait MappingStore: Send + Sync {
    /// Fetch a mapping by key.
    async fn get(&self, key: &str) -> Option<DownloadMapping>;

    /// Insert or replace a mapping under its own `info_hash`.
    async fn set(&self, mapping: DownloadMapping);

    /// Remove a mapping by key, returning it if present.
    async fn remove(&self, key: &str) -> Option<DownloadMapping>;

    /// Snapshot of all mappings, safe to iterate while concurrent writers
    /// proceed.
    async fn values(&self) -> Vec<DownloadMapping>;

    /// Whether the store currently holds no mappings (used to gate the
    /// one-shot cache recovery on process start).
    async fn is_empty(&self) -> bool {
        self.values().await.is_empty()
    }
}

/// Read access to the external grab-history service (out of scope to
/// implement; this adapter only ever reads through this seam).
#[async_trait]
pub trait GrabHistorySource: Send + Sync {
    /// All historical grabs recorded against this adapter instance.
    async fn grabs(&self) -> Vec<GrabRecord>;
}

/// Filesystem capabilities the reconciler needs beyond what the fetcher
/// already owns: directory validation and local payload removal.
#[async_trait]
pub trait DiskOps: Send + Sync {
    /// Validate that `path` exists and is writable.
    async fn validate_download_directory(&self, path: &Path) -> std::io::Result<()>;

    /// Remove a local payload (file or directory) entirely.
    async fn remove_path(&self, path: &Path) -> std::io::Result<()>;
}
