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

//! Background workers that copy cloud objects into the local download
//! directory (C4): byte progress lives on the mapping, failures get
//! bounded exponential backoff, and fetchers never block the reconciler.

mod error;
mod fetcher;
mod readiness;

pub use error::FetchError;
pub use fetcher::AsyncFetcher;
pub use readiness::is_folder_ready;
