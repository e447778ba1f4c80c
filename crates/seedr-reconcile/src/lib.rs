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

//! The reconciliation engine (C5): the Seedr adapter's public surface.
//!
//! Fuses the cloud inventory (C1), the ownership registry (C2), the
//! process-local mapping store (C3) and the async fetcher (C4) into the
//! `DownloadClientItem` view a download-client pipeline polls on a cadence,
//! plus the submit/remove/import/test/recovery operations that bound a
//! release's lifecycle.

mod diagnostics;
mod error;
mod files;
mod folders;
mod items;
mod lifecycle;
mod reconciler;
mod recovery;
mod settings;
mod transfers;

pub use error::{ReconcileError, ReconcileResult};
pub use reconciler::Reconciler;
pub use settings::ReconcilerSettings;

#[cfg(test)]
mod tests;
