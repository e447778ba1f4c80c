//! End-to-end reconciler scenarios assembled from real collaborators
//! (`seedr-store`'s in-memory store, `seedr-fsops`'s real filesystem ops)
//! plus hand-rolled fakes for the cloud proxy, ownership registry and grab
//! history, the three collaborators this crate never owns an
//! implementation of.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use seedr_core::{
    AddedTransfer, CloudClient, CloudError, CloudInventorySnapshot, CloudResult, FolderEntry, GrabHistorySource,
    GrabRecord, OwnershipCheck, OwnershipRegistry, Release, ReleaseOutcome, ReleasePayload, SeedrUser, TransferEntry,
};
use seedr_fsops::FilesystemDiskOps;
use seedr_store::InMemoryMappingStore;
use tempfile::TempDir;

use crate::reconciler::Reconciler;
use crate::settings::ReconcilerSettings;

#[derive(Default)]
struct FakeCloud {
    root: Mutex<CloudInventorySnapshot>,
    folders: Mutex<HashMap<i64, CloudInventorySnapshot>>,
    deleted_folders: Mutex<Vec<i64>>,
    deleted_files: Mutex<Vec<i64>>,
    deleted_transfers: Mutex<Vec<i64>>,
    user: Mutex<Option<SeedrUser>>,
    fail_inventory: Mutex<bool>,
}

impl FakeCloud {
    fn with_root(root: CloudInventorySnapshot) -> Self {
        Self {
            root: Mutex::new(root),
            ..Self::default()
        }
    }

    fn set_root(&self, root: CloudInventorySnapshot) {
        *self.root.lock().unwrap() = root;
    }

    fn set_folder(&self, id: i64, snapshot: CloudInventorySnapshot) {
        self.folders.lock().unwrap().insert(id, snapshot);
    }
}

#[async_trait]
impl CloudClient for FakeCloud {
    async fn get_folder_contents(&self, folder_id: Option<i64>) -> CloudResult<CloudInventorySnapshot> {
        if *self.fail_inventory.lock().unwrap() {
            return Err(CloudError::ServerError { status: 503 });
        }
        match folder_id {
            None => Ok(self.root.lock().unwrap().clone()),
            Some(id) => Ok(self.folders.lock().unwrap().get(&id).cloned().unwrap_or_default()),
        }
    }

    async fn add_magnet(&self, magnet: &str) -> CloudResult<AddedTransfer> {
        let name = magnet
            .split('&')
            .find_map(|part| part.strip_prefix("dn="))
            .unwrap_or("Unknown")
            .to_string();
        Ok(AddedTransfer {
            id: 1,
            name,
            hash: Some("CBC2000000000000000000000000000000F951".to_string()),
        })
    }

    async fn add_torrent_file(&self, filename: &str, _bytes: &[u8]) -> CloudResult<AddedTransfer> {
        Ok(AddedTransfer {
            id: 2,
            name: filename.to_string(),
            hash: None,
        })
    }

    async fn delete_transfer(&self, id: i64) -> CloudResult<()> {
        self.deleted_transfers.lock().unwrap().push(id);
        Ok(())
    }

    async fn delete_folder(&self, id: i64) -> CloudResult<()> {
        self.deleted_folders.lock().unwrap().push(id);
        Ok(())
    }

    async fn delete_file(&self, id: i64) -> CloudResult<()> {
        self.deleted_files.lock().unwrap().push(id);
        Ok(())
    }

    async fn get_user(&self) -> CloudResult<SeedrUser> {
        self.user.lock().unwrap().clone().ok_or(CloudError::AuthFailure)
    }

    async fn download_file_to_path(&self, _file_id: i64, path: &Path) -> CloudResult<()> {
        tokio::fs::write(path, b"payload").await.map_err(|source| CloudError::Io { source })
    }
}

#[derive(Default)]
struct FakeOwnership {
    owned: Mutex<HashMap<String, bool>>,
    release_outcome: Mutex<Option<ReleaseOutcome>>,
}

impl FakeOwnership {
    fn not_owned(hash: &str) -> Self {
        let ownership = Self::default();
        ownership.owned.lock().unwrap().insert(hash.to_string(), false);
        ownership
    }

    fn with_release_outcome(outcome: ReleaseOutcome) -> Self {
        Self {
            owned: Mutex::new(HashMap::new()),
            release_outcome: Mutex::new(Some(outcome)),
        }
    }
}

#[async_trait]
impl OwnershipRegistry for FakeOwnership {
    async fn claim_ownership(&self, info_hash: &str) {
        self.owned.lock().unwrap().insert(info_hash.to_string(), true);
    }

    async fn is_owned_by_me(&self, info_hash: &str) -> OwnershipCheck {
        match self.owned.lock().unwrap().get(info_hash) {
            Some(true) => OwnershipCheck::Owned,
            Some(false) => OwnershipCheck::NotOwned,
            None => OwnershipCheck::Unknown,
        }
    }

    async fn release_ownership(&self, _info_hash: &str) -> ReleaseOutcome {
        self.release_outcome.lock().unwrap().unwrap_or(ReleaseOutcome::WasLastOwner)
    }

    async fn test_connection(&self) -> Option<String> {
        None
    }
}

#[derive(Default)]
struct FakeGrabHistory {
    grabs: Vec<GrabRecord>,
}

#[async_trait]
impl GrabHistorySource for FakeGrabHistory {
    async fn grabs(&self) -> Vec<GrabRecord> {
        self.grabs.clone()
    }
}

struct Harness {
    reconciler: Reconciler,
    cloud: Arc<FakeCloud>,
    _download_dir: TempDir,
    download_path: std::path::PathBuf,
}

fn build_harness(root: CloudInventorySnapshot, shared_account: bool, ownership: Arc<dyn OwnershipRegistry>) -> Harness {
    let download_dir = tempfile::tempdir().unwrap();
    let cloud = Arc::new(FakeCloud::with_root(root));
    let settings = ReconcilerSettings {
        download_directory: download_dir.path().to_path_buf(),
        delete_from_cloud: true,
        shared_account,
        registry_configured: shared_account,
    };
    let reconciler = Reconciler::new(
        cloud.clone(),
        ownership,
        Arc::new(InMemoryMappingStore::new()),
        Arc::new(FakeGrabHistory::default()),
        Arc::new(FilesystemDiskOps),
        settings,
    );
    Harness {
        reconciler,
        cloud,
        download_path: download_dir.path().to_path_buf(),
        _download_dir: download_dir,
    }
}

fn default_harness(root: CloudInventorySnapshot) -> Harness {
    build_harness(root, false, Arc::new(FakeOwnership::default()))
}

// Scenario 1: active-transfer visibility.
#[tokio::test]
async fn active_transfer_is_visible_and_creates_a_mapping() {
    let harness = default_harness(CloudInventorySnapshot {
        transfers: vec![TransferEntry {
            id: 1,
            name: "M".to_string(),
            size: 1000,
            progress: 50.0,
            hash: Some("H1".to_string()),
        }],
        folders: vec![],
        files: vec![],
    });

    let items = harness.reconciler.get_items().await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].download_id, "H1");
    assert_eq!(items[0].title, "M");
    assert_eq!(items[0].total_size, 1000);
    assert_eq!(items[0].remaining_size, 500);
    assert_eq!(items[0].status, seedr_core::ItemStatus::Downloading);

    assert!(harness.reconciler.store.get("H1").await.is_some());
}

// Scenario 2: transfer without hash.
#[tokio::test]
async fn transfer_without_hash_uses_synthetic_key() {
    let harness = default_harness(CloudInventorySnapshot {
        transfers: vec![TransferEntry {
            id: 42,
            name: "X".to_string(),
            size: 1000,
            progress: 50.0,
            hash: None,
        }],
        folders: vec![],
        files: vec![],
    });

    let items = harness.reconciler.get_items().await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].download_id, "seedr-42");
}

// Scenario 3: completed-folder happy path, then mark-as-imported.
#[tokio::test]
async fn completed_folder_round_trip_then_marked_imported() {
    let harness = default_harness(CloudInventorySnapshot::default());

    let release = Release {
        info_hash: None,
        payload: ReleasePayload::Magnet(
            "magnet:?xt=urn:btih:CBC2000000000000000000000000000000F951&dn=Movie".to_string(),
        ),
        title: "Movie".to_string(),
    };
    let download_id = harness.reconciler.submit(release).await.unwrap();
    assert_eq!(download_id, "CBC2000000000000000000000000000000F951");

    harness.cloud.set_root(CloudInventorySnapshot {
        transfers: vec![],
        folders: vec![FolderEntry {
            id: 100,
            name: "Movie".to_string(),
            size: 1000,
        }],
        files: vec![],
    });

    let local_dir = harness.download_path.join("Movie");
    tokio::fs::create_dir_all(&local_dir).await.unwrap();
    tokio::fs::write(local_dir.join("movie.mkv"), vec![0u8; 1000]).await.unwrap();

    let items = harness.reconciler.get_items().await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].status, seedr_core::ItemStatus::Completed);
    assert_eq!(items[0].remaining_size, 0);
    assert!(items[0].output_path.is_some());
    assert!(items[0].can_move_files);
    assert!(items[0].can_be_removed);

    harness.reconciler.mark_item_as_imported(&download_id).await.unwrap();
    assert!(harness.reconciler.store.get(&download_id).await.is_none());
    assert_eq!(harness.cloud.deleted_folders.lock().unwrap().as_slice(), &[100]);
    assert!(harness.cloud.deleted_files.lock().unwrap().is_empty());
    assert!(harness.cloud.deleted_transfers.lock().unwrap().is_empty());
}

// Scenario 4: shared-account foreign item is invisible.
#[tokio::test]
async fn shared_account_hides_items_not_owned_by_this_instance() {
    let ownership: Arc<dyn OwnershipRegistry> = Arc::new(FakeOwnership::not_owned("H2"));
    let harness = build_harness(
        CloudInventorySnapshot {
            transfers: vec![TransferEntry {
                id: 2,
                name: "Y".to_string(),
                size: 500,
                progress: 10.0,
                hash: Some("H2".to_string()),
            }],
            folders: vec![],
            files: vec![],
        },
        true,
        ownership,
    );

    let items = harness.reconciler.get_items().await;
    assert!(items.is_empty());
}

// Scenario 5: registry unavailable during release skips cloud delete but
// still removes local data and the mapping.
#[tokio::test]
async fn unknown_release_outcome_skips_cloud_delete() {
    let ownership: Arc<dyn OwnershipRegistry> = Arc::new(FakeOwnership::with_release_outcome(ReleaseOutcome::Unknown));
    let harness = build_harness(CloudInventorySnapshot::default(), true, ownership);

    harness
        .reconciler
        .store
        .set(seedr_core::DownloadMapping::new_submitted("H3".to_string(), 9, "Movie".to_string()))
        .await;

    harness.reconciler.remove_item("H3", false).await.unwrap();

    assert!(harness.cloud.deleted_transfers.lock().unwrap().is_empty());
    assert!(harness.cloud.deleted_folders.lock().unwrap().is_empty());
    assert!(harness.cloud.deleted_files.lock().unwrap().is_empty());
    assert!(harness.reconciler.store.get("H3").await.is_none());
}

// Scenario 6: partial folder retry, exercised directly against the
// mapping's backoff bookkeeping, since the actual copy runs in
// seedr-fetch's own test suite.
#[tokio::test]
async fn partial_failure_schedules_a_bounded_retry_message() {
    let harness = default_harness(CloudInventorySnapshot {
        transfers: vec![],
        folders: vec![FolderEntry {
            id: 100,
            name: "Movie".to_string(),
            size: 1000,
        }],
        files: vec![],
    });

    let mut mapping = seedr_core::DownloadMapping::new_submitted("ABC".to_string(), 1, "Movie".to_string());
    mapping.folder_id = Some(100);
    mapping.mark_local_failed(Utc::now());
    assert_eq!(mapping.download_attempts, 1);
    harness.reconciler.store.set(mapping).await;

    let items = harness.reconciler.get_items().await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].status, seedr_core::ItemStatus::Downloading);
    assert_eq!(items[0].message.as_deref(), Some("Retry scheduled (attempt 1)"));
}

// Folder readiness ceiling: the 21st unready poll marks the mapping failed
// and resets the counter.
#[tokio::test]
async fn folder_ready_ceiling_marks_failed_after_twenty_attempts() {
    let harness = default_harness(CloudInventorySnapshot::default());
    harness.cloud.set_folder(100, CloudInventorySnapshot::default());

    let folder = FolderEntry {
        id: 100,
        name: "Movie".to_string(),
        size: 1000,
    };
    harness
        .reconciler
        .store
        .set(seedr_core::DownloadMapping::new_submitted("ABC".to_string(), 1, "Movie".to_string()))
        .await;

    for _ in 0..21 {
        let _ = harness.reconciler.process_folder(&folder, Utc::now()).await;
    }

    let mapping = harness.reconciler.store.get("ABC").await.unwrap();
    assert!(mapping.local_download_failed);
    assert_eq!(mapping.folder_ready_attempts, 0);
    assert!(mapping.next_retry_after.is_some());
}

// Cloud inventory failure aborts the poll with an empty list rather than
// propagating.
#[tokio::test]
async fn inventory_failure_returns_empty_list() {
    let harness = default_harness(CloudInventorySnapshot::default());
    *harness.cloud.fail_inventory.lock().unwrap() = true;

    let items = harness.reconciler.get_items().await;
    assert!(items.is_empty());
}

// Steady-state idempotence: two consecutive polls over an unchanged
// snapshot and disk produce identical items.
#[tokio::test]
async fn get_items_is_idempotent_in_the_steady_state() {
    let harness = default_harness(CloudInventorySnapshot {
        transfers: vec![TransferEntry {
            id: 1,
            name: "M".to_string(),
            size: 1000,
            progress: 50.0,
            hash: Some("H1".to_string()),
        }],
        folders: vec![],
        files: vec![],
    });

    let first = harness.reconciler.get_items().await;
    let second = harness.reconciler.get_items().await;
    assert_eq!(first, second);
}

// One-shot cache recovery rebuilds a mapping from grab history when the
// store starts empty.
#[tokio::test]
async fn recovers_mapping_from_grab_history_on_first_poll() {
    let download_dir = tempfile::tempdir().unwrap();
    let cloud = Arc::new(FakeCloud::with_root(CloudInventorySnapshot {
        transfers: vec![TransferEntry {
            id: 7,
            name: "Recovered".to_string(),
            size: 2000,
            progress: 20.0,
            hash: None,
        }],
        folders: vec![],
        files: vec![],
    }));
    let grab_history = Arc::new(FakeGrabHistory {
        grabs: vec![GrabRecord {
            download_id: "RECOVEREDHASH".to_string(),
            seedr_name: "Recovered".to_string(),
            seedr_transfer_id: Some(7),
            imported: false,
        }],
    });
    let settings = ReconcilerSettings {
        download_directory: download_dir.path().to_path_buf(),
        delete_from_cloud: true,
        shared_account: false,
        registry_configured: false,
    };
    let reconciler = Reconciler::new(
        cloud,
        Arc::new(FakeOwnership::default()),
        Arc::new(InMemoryMappingStore::new()),
        grab_history,
        Arc::new(FilesystemDiskOps),
        settings,
    );

    let items = reconciler.get_items().await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].download_id, "RECOVEREDHASH");
    assert!(reconciler.store.get("RECOVEREDHASH").await.is_some());
}
