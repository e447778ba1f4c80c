//! The reconciliation engine (C5): the adapter's public surface, assembled
//! from already-built collaborators. No method here talks to the network or
//! disk directly except through C1/C2/C4's trait seams.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use seedr_core::{CloudClient, DiskOps, GrabHistorySource, MappingStore, OwnershipRegistry};
use seedr_fetch::AsyncFetcher;

use crate::settings::ReconcilerSettings;

/// Fuses cloud inventory, local mappings, disk state and cross-instance
/// ownership into the `DownloadClientItem` view the surrounding pipeline
/// polls.
///
/// `GetItems` is not re-entrant per the component design: [`Self::poll_guard`]
/// serialises it in case the caller cannot itself guarantee serial
/// invocation.
pub struct Reconciler {
    pub(crate) cloud: Arc<dyn CloudClient>,
    pub(crate) ownership: Arc<dyn OwnershipRegistry>,
    pub(crate) store: Arc<dyn MappingStore>,
    pub(crate) grab_history: Arc<dyn GrabHistorySource>,
    pub(crate) disk: Arc<dyn DiskOps>,
    pub(crate) fetcher: AsyncFetcher,
    pub(crate) settings: ReconcilerSettings,
    pub(crate) recovery_attempted: AtomicBool,
    pub(crate) poll_guard: tokio::sync::Mutex<()>,
}

impl Reconciler {
    /// Assemble a reconciler from its five collaborators plus runtime
    /// settings. The async fetcher is built internally since it only ever
    /// needs the cloud client, the mapping store and the download directory.
    #[must_use]
    pub fn new(
        cloud: Arc<dyn CloudClient>,
        ownership: Arc<dyn OwnershipRegistry>,
        store: Arc<dyn MappingStore>,
        grab_history: Arc<dyn GrabHistorySource>,
        disk: Arc<dyn DiskOps>,
        settings: ReconcilerSettings,
    ) -> Self {
        let fetcher = AsyncFetcher::new(cloud.clone(), store.clone(), settings.download_directory.clone());
        Self {
            cloud,
            ownership,
            store,
            grab_history,
            disk,
            fetcher,
            settings,
            recovery_attempted: AtomicBool::new(false),
            poll_guard: tokio::sync::Mutex::new(()),
        }
    }

    pub(crate) fn multi_tenancy_configured(&self) -> bool {
        self.settings.shared_account && self.settings.registry_configured
    }
}
