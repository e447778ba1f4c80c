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

//! Shared data model and trait seams for the Seedr download-client adapter.
//!
//! This crate owns no behaviour of its own: it is the vocabulary every other
//! `seedr-*` crate shares: the [`mapping::DownloadMapping`] record, the
//! normalised cloud shapes in [`cloud_model`], the emitted
//! [`item::DownloadClientItem`] view, and the `async_trait` seams in
//! [`traits`] that let the reconciliation engine be assembled from
//! independently testable collaborators.

pub mod cloud_model;
pub mod error;
pub mod grab;
pub mod item;
pub mod mapping;
pub mod ownership;
pub mod release;
pub mod traits;
pub mod validation;

pub use cloud_model::{AddedTransfer, CloudInventorySnapshot, FileEntry, FolderEntry, SeedrUser, TransferEntry};
pub use error::{CloudError, CloudResult, ReconcileError, ReconcileResult};
pub use grab::{GrabMetadata, GrabRecord};
pub use item::{DownloadClientItem, ItemStatus};
pub use mapping::DownloadMapping;
pub use ownership::{OwnershipCheck, ReleaseOutcome};
pub use release::{Release, ReleasePayload};
pub use traits::{CloudClient, DiskOps, GrabHistorySource, MappingStore, OwnershipRegistry};
pub use validation::{ValidationFailure, ValidationField, ValidationSeverity};
