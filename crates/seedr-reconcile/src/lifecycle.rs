//! `Submit`, `RemoveItem` and `MarkItemAsImported`: the three operations
//! that mutate a mapping's lifecycle outside the polling loop.

use seedr_core::{DownloadMapping, Release, ReleaseOutcome, ReleasePayload};
use seedr_fsops::local_path_for;

use crate::error::{ReconcileError, ReconcileResult};
use crate::reconciler::Reconciler;

impl Reconciler {
    /// Upload a release to the cloud and claim ownership of its info-hash.
    /// Returns the canonical download id.
    pub async fn submit(&self, release: Release) -> ReconcileResult<String> {
        let added = match &release.payload {
            ReleasePayload::Magnet(uri) => {
                if uri.trim().is_empty() {
                    return Err(ReconcileError::EmptyRelease);
                }
                self.cloud.add_magnet(uri).await
            }
            ReleasePayload::TorrentFile { filename, bytes } => {
                if bytes.is_empty() {
                    return Err(ReconcileError::EmptyRelease);
                }
                self.cloud.add_torrent_file(filename, bytes).await
            }
        }
        .map_err(|source| ReconcileError::CloudCallFailed { source })?;

        let info_hash = release
            .info_hash
            .or(added.hash)
            .unwrap_or_else(|| added.name.clone())
            .to_uppercase();

        let mapping = DownloadMapping::new_submitted(info_hash.clone(), added.id, added.name);
        self.store.set(mapping).await;
        self.ownership.claim_ownership(&info_hash).await;

        Ok(info_hash)
    }

    /// Remove a mapping, optionally releasing ownership, deleting cloud
    /// state, and deleting the local payload.
    pub async fn remove_item(&self, download_id: &str, delete_local_data: bool) -> ReconcileResult<()> {
        let mapping = self.store.get(download_id).await.ok_or_else(|| ReconcileError::MappingNotFound {
            download_id: download_id.to_string(),
        })?;

        let should_delete_cloud = self.should_delete_cloud_state(download_id).await;
        if should_delete_cloud {
            self.delete_cloud_state(&mapping).await;
        }

        if delete_local_data {
            if let Ok(local_path) = local_path_for(&self.settings.download_directory, &mapping.name) {
                if let Err(err) = self.disk.remove_path(&local_path).await {
                    tracing::warn!(error = %err, download_id, "local payload removal failed");
                }
            }
        }

        self.store.remove(download_id).await;
        Ok(())
    }

    /// Same cloud-deletion logic as [`Self::remove_item`], gated by
    /// `deleteFromCloud`; never touches local data.
    pub async fn mark_item_as_imported(&self, download_id: &str) -> ReconcileResult<()> {
        let mapping = self.store.get(download_id).await.ok_or_else(|| ReconcileError::MappingNotFound {
            download_id: download_id.to_string(),
        })?;

        if self.settings.delete_from_cloud && self.should_delete_cloud_state(download_id).await {
            self.delete_cloud_state(&mapping).await;
        }

        self.store.remove(download_id).await;
        Ok(())
    }

    async fn should_delete_cloud_state(&self, download_id: &str) -> bool {
        if !self.multi_tenancy_configured() {
            return true;
        }
        match self.ownership.release_ownership(download_id).await {
            ReleaseOutcome::WasLastOwner => true,
            ReleaseOutcome::OthersRemain => false,
            ReleaseOutcome::Unknown => {
                tracing::warn!(download_id, "ownership release unknown; skipping cloud delete");
                false
            }
        }
    }

    pub(crate) async fn delete_cloud_state(&self, mapping: &DownloadMapping) {
        let result = if let Some(folder_id) = mapping.folder_id {
            self.cloud.delete_folder(folder_id).await
        } else if let Some(file_id) = mapping.file_id {
            self.cloud.delete_file(file_id).await
        } else if let Some(transfer_id) = mapping.transfer_id {
            self.cloud.delete_transfer(transfer_id).await
        } else {
            return;
        };
        if let Err(err) = result {
            tracing::warn!(error = %err, info_hash = %mapping.info_hash, "cloud delete failed");
        }
    }
}
