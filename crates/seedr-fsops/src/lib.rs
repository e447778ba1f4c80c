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

//! Filesystem helpers shared across the Seedr download-client adapter:
//! name sanitisation, `.part` handling, completion predicates, and byte
//! accounting used by both the async fetcher and the reconciliation engine.

pub mod completion;
pub mod disk_ops;
pub mod error;
pub mod sanitize;

pub use completion::{
    file_bytes_on_disk, file_download_complete, folder_bytes_on_disk, folder_disk_state,
    folder_download_complete, meets_size_threshold, part_path_for, FolderDiskState,
    COMPLETENESS_THRESHOLD,
};
pub use disk_ops::FilesystemDiskOps;
pub use error::{FsOpsError, FsOpsResult};
pub use sanitize::{local_path_for, sanitize_component};
