//! `RecoverFromHistory` and `GrabMetadata`: the two operations that bridge
//! this adapter's process-local mapping store to the surrounding pipeline's
//! durable grab history.

use seedr_core::{DownloadMapping, GrabMetadata, GrabRecord};

use crate::reconciler::Reconciler;

fn mapping_from_grab(grab: &GrabRecord) -> DownloadMapping {
    DownloadMapping {
        info_hash: grab.download_id.clone(),
        transfer_id: grab.seedr_transfer_id,
        folder_id: None,
        file_id: None,
        name: grab.seedr_name.clone(),
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

impl Reconciler {
    /// Rebuild the mapping store from the external grab-history service.
    /// Called at most once per process, from [`Self::get_items`].
    pub async fn recover_from_history(&self) {
        let grabs = self.grab_history.grabs().await;
        for grab in &grabs {
            if grab.imported {
                continue;
            }
            if self.store.get(&grab.download_id).await.is_some() {
                continue;
            }
            let mapping = mapping_from_grab(grab);
            self.store.set(mapping).await;
            if self.settings.shared_account {
                self.ownership.claim_ownership(&grab.download_id).await;
            }
        }
    }

    /// Try to rebuild a single mapping for a cloud folder or file whose
    /// identity is unknown to the store, by matching its name against
    /// unimported grab history (case-insensitive substring, either
    /// direction).
    pub(crate) async fn rescue_from_grab_history(&self, cloud_name: &str) -> Option<DownloadMapping> {
        let grabs = self.grab_history.grabs().await;
        let cloud_lower = cloud_name.to_lowercase();
        let grab = grabs.iter().find(|g| {
            if g.imported {
                return false;
            }
            let seedr_lower = g.seedr_name.to_lowercase();
            cloud_lower.contains(&seedr_lower) || seedr_lower.contains(&cloud_lower)
        })?;
        Some(mapping_from_grab(grab))
    }

    /// Return the metadata the history pipeline needs to recover this
    /// mapping after a future restart, or `None` if the mapping is unknown.
    pub async fn grab_metadata(&self, download_id: &str) -> Option<GrabMetadata> {
        let mapping = self.store.get(download_id).await?;
        Some(GrabMetadata {
            seedr_name: mapping.name,
            seedr_transfer_id: mapping.transfer_id,
        })
    }
}
