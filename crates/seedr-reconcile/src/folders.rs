//! Per-folder processing: assembled multi-file torrent results.

use chrono::{DateTime, Utc};
use seedr_core::{DownloadClientItem, DownloadMapping, FolderEntry, ItemStatus};
use seedr_fsops::{folder_bytes_on_disk, folder_download_complete, local_path_for};

use crate::reconciler::Reconciler;

/// Polls spent waiting for Seedr to finish assembling a folder before the
/// mapping is marked failed and the counter reset.
const FOLDER_READY_CEILING: u32 = 20;

impl Reconciler {
    pub(crate) async fn process_folder(&self, f: &FolderEntry, now: DateTime<Utc>) -> Option<DownloadClientItem> {
        let all = self.store.values().await;
        let mut mapping = all
            .iter()
            .find(|m| m.folder_id == Some(f.id))
            .or_else(|| all.iter().find(|m| m.name.eq_ignore_ascii_case(&f.name)))
            .cloned();

        if mapping.is_none() {
            if self.settings.shared_account {
                return None;
            }
            mapping = self.rescue_from_grab_history(&f.name).await;
            if mapping.is_none() {
                tracing::warn!(folder = %f.name, "no mapping found for cloud folder; skipping");
                return None;
            }
        }
        let mut mapping = mapping.expect("checked above");
        mapping.folder_id = Some(f.id);

        let local_path = match local_path_for(&self.settings.download_directory, &f.name) {
            Ok(path) => path,
            Err(err) => {
                tracing::warn!(error = %err, folder = %f.name, "folder name rejected");
                return None;
            }
        };

        let on_disk_complete = !mapping.local_download_in_progress
            && !mapping.local_download_failed
            && folder_download_complete(&local_path, f.size).unwrap_or(false);

        if mapping.local_download_complete || on_disk_complete {
            mapping.local_download_complete = true;
            mapping.local_download_failed = false;
            let info_hash = mapping.info_hash.clone();
            self.store.set(mapping).await;
            return Some(DownloadClientItem {
                download_id: info_hash,
                title: f.name.clone(),
                total_size: f.size,
                remaining_size: 0,
                remaining_time: None,
                status: ItemStatus::Completed,
                message: None,
                output_path: Some(local_path.display().to_string()),
                can_move_files: true,
                can_be_removed: true,
            });
        }

        if mapping.local_download_failed {
            if !mapping.retry_due(now) {
                let message = format!("Retry scheduled (attempt {})", mapping.download_attempts);
                let item = Self::waiting_item(&mapping, f.size, message);
                self.store.set(mapping).await;
                return Some(item);
            }
            mapping.bump_attempts_for_retry();
        }

        let children = match self.cloud.get_folder_contents(Some(f.id)).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!(error = %err, folder = %f.name, "folder listing failed; skipping this poll");
                self.store.set(mapping).await;
                return None;
            }
        };

        if !seedr_fetch::is_folder_ready(&children, f.size) {
            mapping.folder_ready_attempts += 1;
            if mapping.folder_ready_attempts > FOLDER_READY_CEILING {
                mapping.mark_local_failed(now);
                mapping.folder_ready_attempts = 0;
            }
            let message = "Waiting for Seedr to finish processing".to_string();
            let item = Self::waiting_item(&mapping, f.size, message);
            self.store.set(mapping).await;
            return Some(item);
        }

        mapping.folder_ready_attempts = 0;
        let info_hash = mapping.info_hash.clone();
        self.store.set(mapping).await;
        self.fetcher.start_folder_copy(&info_hash, f.id, &f.name, f.size).await;

        let mapping = self.store.get(&info_hash).await;
        let bytes_on_disk = folder_bytes_on_disk(&local_path).unwrap_or(0);
        let remaining_size = f.size.saturating_sub(bytes_on_disk);
        let remaining_time = mapping
            .as_ref()
            .and_then(|m| m.local_download_start_time)
            .and_then(|start| Self::estimate_remaining_seconds(start, now, bytes_on_disk, remaining_size));

        Some(DownloadClientItem {
            download_id: info_hash,
            title: f.name.clone(),
            total_size: f.size,
            remaining_size,
            remaining_time,
            status: ItemStatus::Downloading,
            message: None,
            output_path: None,
            can_move_files: false,
            can_be_removed: false,
        })
    }

    pub(crate) fn estimate_remaining_seconds(
        start: DateTime<Utc>,
        now: DateTime<Utc>,
        bytes_on_disk: u64,
        remaining_size: u64,
    ) -> Option<i64> {
        let elapsed = (now - start).num_seconds();
        if elapsed <= 0 || bytes_on_disk == 0 {
            return None;
        }
        let rate = bytes_on_disk as f64 / elapsed as f64;
        if rate <= 0.0 {
            return None;
        }
        Some((remaining_size as f64 / rate) as i64)
    }

    pub(crate) fn waiting_item(mapping: &DownloadMapping, total_size: u64, message: String) -> DownloadClientItem {
        DownloadClientItem {
            download_id: mapping.info_hash.clone(),
            title: mapping.name.clone(),
            total_size,
            remaining_size: total_size,
            remaining_time: None,
            status: ItemStatus::Downloading,
            message: Some(message),
            output_path: None,
            can_move_files: false,
            can_be_removed: false,
        }
    }
}
