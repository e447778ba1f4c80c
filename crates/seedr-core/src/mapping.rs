//! `DownloadMapping`: the central per-release record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Joins a BitTorrent info-hash (or synthetic key) to Seedr cloud identifiers
/// and the state of the cloud-to-local copy.
///
/// # Invariants
/// - `info_hash` is unique within a [`crate::traits::MappingStore`].
/// - `local_download_in_progress` implies neither `local_download_complete`
///   nor `local_download_failed`.
/// - `local_download_complete` implies `next_retry_after.is_none()` and
///   `download_attempts == 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadMapping {
    /// Canonical key: uppercase hex info-hash, or `seedr-<id>` when no hash
    /// was available at discovery time.
    pub info_hash: String,
    /// Cloud transfer id, set at submit time.
    pub transfer_id: Option<i64>,
    /// Cloud folder id, discovered once the transfer materialises as a
    /// multi-file folder.
    pub folder_id: Option<i64>,
    /// Cloud file id, discovered once the transfer materialises as a
    /// single file.
    pub file_id: Option<i64>,
    /// Display name as returned by Seedr at claim time.
    pub name: String,
    /// The cloud-to-local copy has finished and the local payload is intact.
    pub local_download_complete: bool,
    /// A fetcher is currently copying this mapping's payload.
    pub local_download_in_progress: bool,
    /// The last fetch attempt failed; retry is scheduled via
    /// `next_retry_after`.
    pub local_download_failed: bool,
    /// Number of local-copy attempts made so far (reset to 0 on success).
    pub download_attempts: u32,
    /// Earliest time a failed local copy may be retried.
    pub next_retry_after: Option<DateTime<Utc>>,
    /// Polls spent waiting for Seedr to finish assembling a folder.
    /// Terminal after 20: the 21st attempt marks the mapping failed and
    /// resets this counter.
    pub folder_ready_attempts: u32,
    /// Most recently observed cloud transfer progress, 0-100.
    pub last_progress: f64,
    /// Wall-clock time `last_progress` was last updated.
    pub last_progress_time: Option<DateTime<Utc>>,
    /// When the current (or most recent) local copy attempt started.
    pub local_download_start_time: Option<DateTime<Utc>>,
    /// Declared total size of the local payload in bytes.
    pub local_total_bytes: u64,
}

impl DownloadMapping {
    /// A fresh mapping created at submit time: only `transfer_id` is known.
    #[must_use]
    pub fn new_submitted(info_hash: String, transfer_id: i64, name: String) -> Self {
        Self {
            info_hash,
            transfer_id: Some(transfer_id),
            folder_id: None,
            file_id: None,
            name,
            local_download_complete: false,
            local_download_in_progress: false,
            local_download_failed: false,
            download_attempts: 0,
            next_retry_after: None,
            folder_ready_attempts: 0,
            last_progress: 0.0,
            last_progress_time: None,
            local_download_start_time: None,
            local_total_bytes: 0,
        }
    }

    /// Whether any cloud identifier has been observed at least once.
    #[must_use]
    pub const fn has_cloud_identity(&self) -> bool {
        self.transfer_id.is_some() || self.folder_id.is_some() || self.file_id.is_some()
    }

    /// Mark the mapping as having completed its local copy, resetting all
    /// retry state per the invariant that a complete mapping carries no
    /// backoff.
    pub fn mark_local_complete(&mut self) {
        self.local_download_complete = true;
        self.local_download_in_progress = false;
        self.local_download_failed = false;
        self.download_attempts = 0;
        self.next_retry_after = None;
    }

    /// Mark the mapping as having failed its local copy, bump the attempt
    /// counter, and schedule the next retry with exponential backoff
    /// (`2^attempts` minutes, capped at 30).
    pub fn mark_local_failed(&mut self, now: DateTime<Utc>) {
        self.local_download_in_progress = false;
        self.local_download_failed = true;
        self.download_attempts = self.download_attempts.saturating_add(1);
        let backoff_minutes = 1u32
            .checked_shl(self.download_attempts.min(30))
            .unwrap_or(u32::MAX)
            .min(30);
        self.next_retry_after = Some(now + chrono::Duration::minutes(i64::from(backoff_minutes)));
    }

    /// Called when a failed mapping's retry window has elapsed: bumps the
    /// attempt counter again and clears `failed` so the reconciler can fall
    /// through to restarting the copy.
    pub fn bump_attempts_for_retry(&mut self) {
        self.download_attempts = self.download_attempts.saturating_add(1);
        self.local_download_failed = false;
    }

    /// Whether a retry is due (no backoff scheduled, or it has elapsed).
    #[must_use]
    pub fn retry_due(&self, now: DateTime<Utc>) -> bool {
        match self.next_retry_after {
            Some(at) => now >= at,
            None => true,
        }
    }
}
