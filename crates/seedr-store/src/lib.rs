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

//! Process-local concurrent keyed store of `DownloadMapping` records (C3).
//!
//! Not persisted across restarts: durability is delegated to recovery from
//! grab history. The store only needs to support concurrent reads and
//! writes from the reconciliation path and the async fetchers without ever
//! exposing a partially written mapping: mutations are whole-record
//! replace, and [`InMemoryMappingStore::values`] snapshot-copies before
//! returning so callers can iterate while writers proceed.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use seedr_core::{DownloadMapping, MappingStore};

/// `MappingStore` backed by an in-process `RwLock<HashMap<..>>`.
#[derive(Default)]
pub struct InMemoryMappingStore {
    entries: RwLock<HashMap<String, DownloadMapping>>,
}

impl InMemoryMappingStore {
    /// Construct an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MappingStore for InMemoryMappingStore {
    async fn get(&self, key: &str) -> Option<DownloadMapping> {
        self.entries
            .read()
            .expect("mapping store lock poisoned")
            .get(key)
            .cloned()
    }

    async fn set(&self, mapping: DownloadMapping) {
        self.entries
            .write()
            .expect("mapping store lock poisoned")
            .insert(mapping.info_hash.clone(), mapping);
    }

    async fn remove(&self, key: &str) -> Option<DownloadMapping> {
        self.entries
            .write()
            .expect("mapping store lock poisoned")
            .remove(key)
    }

    async fn values(&self) -> Vec<DownloadMapping> {
        self.entries
            .read()
            .expect("mapping store lock poisoned")
            .values()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn sample(hash: &str) -> DownloadMapping {
        DownloadMapping::new_submitted(hash.to_string(), 1, "Movie".to_string())
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let store = InMemoryMappingStore::new();
        store.set(sample("ABC")).await;
        let fetched = store.get("ABC").await.unwrap();
        assert_eq!(fetched.info_hash, "ABC");
    }

    #[tokio::test]
    async fn remove_returns_and_clears_the_entry() {
        let store = InMemoryMappingStore::new();
        store.set(sample("ABC")).await;
        let removed = store.remove("ABC").await;
        assert!(removed.is_some());
        assert!(store.get("ABC").await.is_none());
    }

    #[tokio::test]
    async fn values_snapshots_while_concurrent_writers_proceed() {
        let store = Arc::new(InMemoryMappingStore::new());
        for i in 0..10 {
            store.set(sample(&format!("HASH{i}"))).await;
        }

        let writer_store = store.clone();
        let writer = tokio::spawn(async move {
            for i in 10..20 {
                writer_store.set(sample(&format!("HASH{i}"))).await;
            }
        });

        let snapshot = store.values().await;
        writer.await.unwrap();

        assert!(snapshot.len() >= 10);
        assert_eq!(store.values().await.len(), 20);
    }

    #[tokio::test]
    async fn is_empty_reflects_store_state() {
        let store = InMemoryMappingStore::new();
        assert!(store.is_empty().await);
        store.set(sample("ABC")).await;
        assert!(!store.is_empty().await);
    }
}
