#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]
#![allow(unexpected_cfgs)]

//! Bootstraps and wires the Seedr download-client adapter from
//! configuration: the one place that turns an [`AdapterConfig`] into a
//! running [`Reconciler`] with every collaborator (C1-C4) assembled behind
//! it.
//!
//! Mirrors the shape of a plugin registry instantiating a download client
//! (out of scope per §1): given configuration and a grab-history source,
//! produce one ready-to-poll adapter instance.

mod error;
mod grab_history;

use std::sync::Arc;

use seedr_config::AdapterConfig;
use seedr_core::{CloudClient, DiskOps, GrabHistorySource, MappingStore, OwnershipRegistry};
use seedr_fsops::FilesystemDiskOps;
use seedr_ownership::{NoopOwnershipRegistry, RedisOwnershipRegistry};
use seedr_reconcile::{Reconciler, ReconcilerSettings};
use seedr_store::InMemoryMappingStore;

pub use error::AdapterError;
pub use grab_history::NullGrabHistorySource;

/// A fully wired Seedr adapter instance. Thin wrapper around the
/// [`Reconciler`] that owns construction of its collaborators; every public
/// operation is delegated straight through.
pub struct SeedrAdapter {
    reconciler: Arc<Reconciler>,
}

impl SeedrAdapter {
    /// Assemble the cloud client, ownership registry, mapping store, disk
    /// ops and reconciler from `config`, using `grab_history` as the
    /// external cache-recovery source.
    pub async fn build(
        config: AdapterConfig,
        grab_history: Arc<dyn GrabHistorySource>,
    ) -> Result<Self, AdapterError> {
        let cloud: Arc<dyn CloudClient> = Arc::new(
            seedr_cloud::SeedrClient::new(config.email.clone(), config.password.clone())
                .map_err(|source| AdapterError::CloudClient { source })?,
        );

        let ownership: Arc<dyn OwnershipRegistry> = if config.registry_configured() {
            let connection_string = config
                .redis_connection_string
                .as_deref()
                .expect("registry_configured implies a connection string");
            let instance_tag = config.instance_tag.clone().unwrap_or_default();
            Arc::new(
                RedisOwnershipRegistry::connect(connection_string, instance_tag)
                    .await
                    .map_err(|source| AdapterError::OwnershipRegistry { source })?,
            )
        } else {
            Arc::new(NoopOwnershipRegistry)
        };

        let store: Arc<dyn MappingStore> = Arc::new(InMemoryMappingStore::new());
        let disk: Arc<dyn DiskOps> = Arc::new(FilesystemDiskOps);

        let settings = ReconcilerSettings {
            download_directory: config.download_directory.clone(),
            delete_from_cloud: config.delete_from_cloud,
            shared_account: config.shared_account,
            registry_configured: config.registry_configured(),
        };

        let reconciler = Arc::new(Reconciler::new(cloud, ownership, store, grab_history, disk, settings));

        Ok(Self { reconciler })
    }

    /// The assembled reconciliation engine, for callers that want direct
    /// access to its public surface (`submit`, `get_items`, `remove_item`,
    /// `mark_item_as_imported`, `test`, recovery).
    #[must_use]
    pub fn reconciler(&self) -> Arc<Reconciler> {
        Arc::clone(&self.reconciler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(download_dir: &std::path::Path) -> AdapterConfig {
        let mut settings = HashMap::new();
        settings.insert("email".to_string(), "user@example.com".to_string());
        settings.insert("password".to_string(), "secret".to_string());
        settings.insert(
            "downloadDirectory".to_string(),
            download_dir.display().to_string(),
        );
        AdapterConfig::from_settings(&settings).unwrap()
    }

    #[tokio::test]
    async fn builds_with_noop_registry_when_shared_account_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let adapter = SeedrAdapter::build(config(dir.path()), Arc::new(NullGrabHistorySource))
            .await
            .unwrap();
        // No network call here: constructing the cloud client never
        // dials out, it only prepares the reqwest client.
        let _ = adapter.reconciler();
    }
}
