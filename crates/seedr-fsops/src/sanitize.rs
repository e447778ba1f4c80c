//! Cloud-supplied name sanitisation.
//!
//! Seedr names are treated as untrusted: before joining with the local
//! download root, every name is reduced to its base-name component. An
//! empty base name (e.g. a name consisting solely of `.`/`..`/separators)
//! is rejected rather than silently producing the root path itself.

use std::path::{Path, PathBuf};

use crate::error::{FsOpsError, FsOpsResult};

/// Reduce a cloud-supplied name to a single, safe path component.
pub fn sanitize_component(raw: &str) -> FsOpsResult<PathBuf> {
    let base = Path::new(raw)
        .file_name()
        .map(PathBuf::from)
        .filter(|name| !name.as_os_str().is_empty());

    base.ok_or_else(|| FsOpsError::InvalidName {
        field: "cloud_name",
        reason: "empty_base_name",
        value: raw.to_string(),
    })
}

/// Build the local destination path for a cloud-supplied name under
/// `download_dir`.
pub fn local_path_for(download_dir: &Path, raw_name: &str) -> FsOpsResult<PathBuf> {
    Ok(download_dir.join(sanitize_component(raw_name)?))
}
