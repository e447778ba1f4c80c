//! Per-file processing: assembled single-file torrent results. Symmetric to
//! [`crate::folders`], minus the sub-listing readiness wait, since a
//! root-listed file is already fully materialised.

use chrono::{DateTime, Utc};
use seedr_core::{DownloadClientItem, FileEntry, ItemStatus};
use seedr_fsops::{file_bytes_on_disk, file_download_complete, local_path_for};

use crate::reconciler::Reconciler;

impl Reconciler {
    pub(crate) async fn process_file(&self, file: &FileEntry, now: DateTime<Utc>) -> Option<DownloadClientItem> {
        let all = self.store.values().await;
        let mut mapping = all
            .iter()
            .find(|m| m.file_id == Some(file.id))
            .or_else(|| all.iter().find(|m| m.name.eq_ignore_ascii_case(&file.name)))
            .cloned();

        if mapping.is_none() {
            if self.settings.shared_account {
                return None;
            }
            mapping = self.rescue_from_grab_history(&file.name).await;
            if mapping.is_none() {
                tracing::warn!(file = %file.name, "no mapping found for cloud file; skipping");
                return None;
            }
        }
        let mut mapping = mapping.expect("checked above");
        mapping.file_id = Some(file.id);

        let local_path = match local_path_for(&self.settings.download_directory, &file.name) {
            Ok(path) => path,
            Err(err) => {
                tracing::warn!(error = %err, file = %file.name, "file name rejected");
                return None;
            }
        };

        let on_disk_complete = !mapping.local_download_in_progress
            && !mapping.local_download_failed
            && file_download_complete(&local_path, file.size);

        if mapping.local_download_complete || on_disk_complete {
            mapping.local_download_complete = true;
            mapping.local_download_failed = false;
            let info_hash = mapping.info_hash.clone();
            self.store.set(mapping).await;
            return Some(DownloadClientItem {
                download_id: info_hash,
                title: file.name.clone(),
                total_size: file.size,
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
                let item = Self::waiting_item(&mapping, file.size, message);
                self.store.set(mapping).await;
                return Some(item);
            }
            mapping.bump_attempts_for_retry();
        }

        let info_hash = mapping.info_hash.clone();
        self.store.set(mapping).await;
        self.fetcher
            .start_file_copy(&info_hash, file.id, &file.name, file.size)
            .await;

        let mapping = self.store.get(&info_hash).await;
        let bytes_on_disk = file_bytes_on_disk(&local_path);
        let remaining_size = file.size.saturating_sub(bytes_on_disk);
        let remaining_time = mapping
            .as_ref()
            .and_then(|m| m.local_download_start_time)
            .and_then(|start| Self::estimate_remaining_seconds(start, now, bytes_on_disk, remaining_size));

        Some(DownloadClientItem {
            download_id: info_hash,
            title: file.name.clone(),
            total_size: file.size,
            remaining_size,
            remaining_time,
            status: ItemStatus::Downloading,
            message: None,
            output_path: None,
            can_move_files: false,
            can_be_removed: false,
        })
    }
}
