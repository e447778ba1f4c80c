//! Background cloud-to-local copy workers (C4).
//!
//! Fetchers are idempotent at the start boundary (a mapping already
//! `localDownloadInProgress` makes the call a no-op), run as detached
//! `tokio::spawn` tasks, and never propagate an error into the
//! reconciliation path: every failure is caught, logged, and recorded on
//! the mapping via [`seedr_core::DownloadMapping::mark_local_failed`].

use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;

use chrono::Utc;
use seedr_core::{CloudClient, MappingStore};
use seedr_fsops::{file_bytes_on_disk, local_path_for, meets_size_threshold};

use crate::error::FetchError;

/// Owns the collaborators needed to perform a cloud-to-local copy:
/// `Arc`-shared so `start_*` can hand a cheap clone to each detached task.
#[derive(Clone)]
pub struct AsyncFetcher {
    cloud: Arc<dyn CloudClient>,
    store: Arc<dyn MappingStore>,
    download_dir: std::path::PathBuf,
}

impl AsyncFetcher {
    /// Build a fetcher that writes into `download_dir`.
    #[must_use]
    pub fn new(cloud: Arc<dyn CloudClient>, store: Arc<dyn MappingStore>, download_dir: std::path::PathBuf) -> Self {
        Self {
            cloud,
            store,
            download_dir,
        }
    }

    /// Start (or no-op if already running) a recursive copy of a cloud
    /// folder into the download directory.
    pub async fn start_folder_copy(&self, mapping_key: &str, folder_id: i64, folder_name: &str, declared_size: u64) {
        if !self.begin(mapping_key, declared_size).await {
            return;
        }

        let cloud = self.cloud.clone();
        let store = self.store.clone();
        let download_dir = self.download_dir.clone();
        let mapping_key = mapping_key.to_string();
        let folder_name = folder_name.to_string();

        tokio::spawn(async move {
            let outcome = copy_folder(&cloud, &download_dir, folder_id, &folder_name).await;
            finish(&store, &mapping_key, outcome).await;
        });
    }

    /// Start (or no-op if already running) a copy of a single cloud file
    /// into the download directory.
    pub async fn start_file_copy(&self, mapping_key: &str, file_id: i64, file_name: &str, declared_size: u64) {
        if !self.begin(mapping_key, declared_size).await {
            return;
        }

        let cloud = self.cloud.clone();
        let store = self.store.clone();
        let download_dir = self.download_dir.clone();
        let mapping_key = mapping_key.to_string();
        let file_name = file_name.to_string();

        tokio::spawn(async move {
            let outcome = copy_file(&cloud, &download_dir, file_id, &file_name, declared_size).await;
            finish(&store, &mapping_key, outcome).await;
        });
    }

    async fn begin(&self, mapping_key: &str, declared_size: u64) -> bool {
        let Some(mut mapping) = self.store.get(mapping_key).await else {
            return false;
        };
        if mapping.local_download_in_progress {
            return false;
        }
        mapping.local_download_in_progress = true;
        mapping.local_download_start_time = Some(Utc::now());
        mapping.local_total_bytes = declared_size;
        self.store.set(mapping).await;
        true
    }
}

async fn finish(store: &Arc<dyn MappingStore>, mapping_key: &str, outcome: Result<(), FetchError>) {
    let Some(mut mapping) = store.get(mapping_key).await else {
        return;
    };
    match outcome {
        Ok(()) => mapping.mark_local_complete(),
        Err(err) => {
            tracing::warn!(error = %err, mapping_key, "local copy failed");
            mapping.mark_local_failed(Utc::now());
        }
    }
    store.set(mapping).await;
}

async fn copy_file(
    cloud: &Arc<dyn CloudClient>,
    download_dir: &Path,
    file_id: i64,
    file_name: &str,
    declared_size: u64,
) -> Result<(), FetchError> {
    let dest = local_path_for(download_dir, file_name)?;
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    if dest.exists() && meets_size_threshold(file_bytes_on_disk(&dest), declared_size) {
        return Ok(());
    }
    cloud.download_file_to_path(file_id, &dest).await?;
    Ok(())
}

async fn copy_folder(
    cloud: &Arc<dyn CloudClient>,
    download_dir: &Path,
    folder_id: i64,
    folder_name: &str,
) -> Result<(), FetchError> {
    let local_root = local_path_for(download_dir, folder_name)?;
    tokio::fs::create_dir_all(&local_root).await?;

    let mut files_seen = 0usize;
    let mut failures = 0usize;
    walk_folder(cloud, &local_root, folder_id, &mut files_seen, &mut failures).await?;

    if files_seen == 0 && failures == 0 {
        return Err(FetchError::EmptySubtree);
    }
    if failures > 0 {
        return Err(FetchError::Io {
            source: std::io::Error::other(format!("{failures} file(s) failed to copy")),
        });
    }
    Ok(())
}

type BoxedWalk<'a> = Pin<Box<dyn Future<Output = Result<(), FetchError>> + Send + 'a>>;

fn walk_folder<'a>(
    cloud: &'a Arc<dyn CloudClient>,
    local_root: &'a Path,
    folder_id: i64,
    files_seen: &'a mut usize,
    failures: &'a mut usize,
) -> BoxedWalk<'a> {
    Box::pin(async move {
        let contents = cloud.get_folder_contents(Some(folder_id)).await?;

        for file in &contents.files {
            *files_seen += 1;
            let dest = local_path_for(local_root, &file.name)?;
            if dest.exists() && meets_size_threshold(file_bytes_on_disk(&dest), file.size) {
                continue;
            }
            if let Err(err) = cloud.download_file_to_path(file.id, &dest).await {
                tracing::warn!(error = %err, file = %file.name, "file copy failed");
                *failures += 1;
            }
        }

        for sub in &contents.folders {
            let sub_root = local_path_for(local_root, &sub.name)?;
            tokio::fs::create_dir_all(&sub_root).await?;
            walk_folder(cloud, &sub_root, sub.id, files_seen, failures).await?;
        }

        Ok(())
    })
}
