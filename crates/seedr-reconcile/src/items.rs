//! `GetItems`: the per-poll orchestration step. Fans out to the per-kind
//! processors in [`crate::transfers`], [`crate::folders`] and
//! [`crate::files`]; nothing here talks to the cloud beyond the single
//! inventory snapshot call.

use std::collections::HashSet;
use std::sync::atomic::Ordering;

use chrono::Utc;
use seedr_core::DownloadClientItem;

use crate::reconciler::Reconciler;

impl Reconciler {
    /// Return the current view of every cloud-tracked item. Invoked on a
    /// polling cadence by the caller; safe to call concurrently (serialised
    /// internally), though the caller is expected to call it serially.
    pub async fn get_items(&self) -> Vec<DownloadClientItem> {
        let _guard = self.poll_guard.lock().await;

        if !self.recovery_attempted.swap(true, Ordering::SeqCst) && self.store.is_empty().await {
            self.recover_from_history().await;
        }

        let snapshot = match self.cloud.get_folder_contents(None).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!(error = %err, "cloud inventory fetch failed; skipping this poll");
                return Vec::new();
            }
        };

        let active_transfer_names: HashSet<String> = snapshot
            .transfers
            .iter()
            .filter(|t| !t.name.trim().is_empty())
            .map(|t| t.name.to_lowercase())
            .collect();

        let now = Utc::now();
        let mut items = Vec::with_capacity(snapshot.transfers.len() + snapshot.folders.len() + snapshot.files.len());

        for transfer in &snapshot.transfers {
            if let Some(item) = self.process_transfer(transfer, now).await {
                items.push(item);
            }
        }

        for folder in &snapshot.folders {
            if active_transfer_names.contains(&folder.name.to_lowercase()) {
                continue;
            }
            if let Some(item) = self.process_folder(folder, now).await {
                items.push(item);
            }
        }

        for file in &snapshot.files {
            if active_transfer_names.contains(&file.name.to_lowercase()) {
                continue;
            }
            if let Some(item) = self.process_file(file, now).await {
                items.push(item);
            }
        }

        items
    }
}
