//! Per-transfer processing: cloud-side ingest still in progress, not yet
//! materialised as a folder or file.

use chrono::{DateTime, Utc};
use seedr_core::{DownloadClientItem, DownloadMapping, ItemStatus, OwnershipCheck, TransferEntry};

use crate::reconciler::Reconciler;

impl Reconciler {
    pub(crate) async fn process_transfer(&self, t: &TransferEntry, now: DateTime<Utc>) -> Option<DownloadClientItem> {
        let all = self.store.values().await;
        let existing = all
            .iter()
            .find(|m| m.transfer_id == Some(t.id))
            .or_else(|| all.iter().find(|m| m.name.eq_ignore_ascii_case(&t.name)))
            .cloned();

        let info_hash = existing
            .as_ref()
            .map(|m| m.info_hash.clone())
            .or_else(|| t.hash.as_ref().map(|h| h.to_uppercase()))
            .unwrap_or_else(|| format!("seedr-{}", t.id));

        if self.settings.shared_account {
            if let OwnershipCheck::NotOwned = self.ownership.is_owned_by_me(&info_hash).await {
                return None;
            }
        }

        let had_existing = existing.is_some();
        let hash_usable = t.hash.as_ref().is_some_and(|h| !h.trim().is_empty());
        let mut mapping =
            existing.unwrap_or_else(|| DownloadMapping::new_submitted(info_hash.clone(), t.id, t.name.clone()));

        let mut remaining_time = None;
        if t.progress > 0.0 && t.progress < 100.0 && t.progress > mapping.last_progress {
            if let Some(last_time) = mapping.last_progress_time {
                let elapsed = (now - last_time).num_seconds() as f64;
                if elapsed > 0.0 {
                    let rate = (t.progress - mapping.last_progress) / elapsed;
                    if rate > 0.0 {
                        let eta = (100.0 - t.progress) / rate;
                        if eta > 0.0 && eta < 86_400.0 {
                            remaining_time = Some(eta as i64);
                        }
                    }
                }
            }
        }
        if (t.progress - mapping.last_progress).abs() > f64::EPSILON {
            mapping.last_progress = t.progress;
            mapping.last_progress_time = Some(now);
        }

        if had_existing || hash_usable {
            self.store.set(mapping).await;
        }

        let transferred = ((t.size as f64) * t.progress / 100.0).floor() as u64;
        let remaining_size = t.size.saturating_sub(transferred);

        Some(DownloadClientItem {
            download_id: info_hash,
            title: t.name.clone(),
            total_size: t.size,
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
