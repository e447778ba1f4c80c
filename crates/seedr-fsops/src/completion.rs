//! Local-copy completion and byte-accounting predicates.
//!
//! These are the read-only counterpart to the fetcher's writes: given a
//! local path and a declared cloud size, decide whether the copy looks
//! finished, and how many bytes are currently on disk either way.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{FsOpsError, FsOpsResult};

/// Fraction of the declared cloud size that must be present locally for a
/// payload to be considered complete (or, during readiness checks, for a
/// cloud folder to be considered assembled). See the open question in the
/// design notes: this adapter chooses to skip already-downloaded files on
/// restart at this same threshold.
pub const COMPLETENESS_THRESHOLD: f64 = 0.95;

/// Whether `actual` bytes satisfy the completeness threshold against
/// `declared`. A declared size of zero always satisfies the threshold
/// (there is nothing to wait for).
#[must_use]
pub fn meets_size_threshold(actual: u64, declared: u64) -> bool {
    declared == 0 || (actual as f64) >= COMPLETENESS_THRESHOLD * (declared as f64)
}

/// Aggregate state of a local folder relevant to completion and progress
/// accounting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderDiskState {
    /// Total bytes across every non-directory entry in the subtree.
    pub total_bytes: u64,
    /// Number of non-`.part` files in the subtree.
    pub file_count: usize,
    /// Whether any `.part` file remains anywhere in the subtree.
    pub has_part_file: bool,
}

fn is_part_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "part")
}

/// Walk `path` and summarise its on-disk state. Returns the default (all
/// zero) state when `path` does not exist.
pub fn folder_disk_state(path: &Path) -> FsOpsResult<FolderDiskState> {
    if !path.is_dir() {
        return Ok(FolderDiskState::default());
    }

    let mut state = FolderDiskState::default();
    for entry in WalkDir::new(path) {
        let entry = entry.map_err(|source| FsOpsError::walkdir("folder_disk_state", path, source))?;
        if entry.file_type().is_dir() {
            continue;
        }
        let metadata = entry
            .metadata()
            .map_err(|source| FsOpsError::walkdir("folder_disk_state", path, source))?;
        state.total_bytes += metadata.len();
        if is_part_file(entry.path()) {
            state.has_part_file = true;
        } else {
            state.file_count += 1;
        }
    }
    Ok(state)
}

/// Total bytes currently on disk under a folder's subtree, `.part` files
/// included (used for in-progress byte-remaining estimates).
pub fn folder_bytes_on_disk(path: &Path) -> FsOpsResult<u64> {
    Ok(folder_disk_state(path)?.total_bytes)
}

/// A folder is complete when it exists, holds at least one non-`.part`
/// file, holds no `.part` files, and its total bytes meet the completeness
/// threshold against the declared cloud size.
pub fn folder_download_complete(path: &Path, declared_size: u64) -> FsOpsResult<bool> {
    let state = folder_disk_state(path)?;
    if state.file_count == 0 || state.has_part_file {
        return Ok(false);
    }
    Ok(meets_size_threshold(state.total_bytes, declared_size))
}

/// The `.part` path a streaming download writes to before the atomic
/// rename on success.
#[must_use]
pub fn part_path_for(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push(".part");
    PathBuf::from(os)
}

/// Bytes currently on disk for a single file download: prefers the
/// in-progress `.part` file when present, else the final file, else zero.
#[must_use]
pub fn file_bytes_on_disk(path: &Path) -> u64 {
    let part = part_path_for(path);
    if let Ok(metadata) = part.metadata() {
        return metadata.len();
    }
    path.metadata().map(|m| m.len()).unwrap_or(0)
}

/// A single file is complete when the final (non-`.part`) path exists and
/// its size meets the completeness threshold against the declared cloud
/// size.
#[must_use]
pub fn file_download_complete(path: &Path, declared_size: u64) -> bool {
    match path.metadata() {
        Ok(metadata) => meets_size_threshold(metadata.len(), declared_size),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn incomplete_folder_with_part_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("movie.mkv"), vec![0u8; 950]).unwrap();
        fs::write(dir.path().join("extra.mkv.part"), vec![0u8; 10]).unwrap();
        assert!(!folder_download_complete(dir.path(), 1000).unwrap());
    }

    #[test]
    fn complete_folder_meets_threshold() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("movie.mkv"), vec![0u8; 960]).unwrap();
        assert!(folder_download_complete(dir.path(), 1000).unwrap());
    }

    #[test]
    fn empty_folder_is_never_complete() {
        let dir = tempdir().unwrap();
        assert!(!folder_download_complete(dir.path(), 1000).unwrap());
    }

    #[test]
    fn missing_folder_is_not_complete() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(!folder_download_complete(&missing, 1000).unwrap());
    }

    #[test]
    fn file_bytes_on_disk_prefers_part_file() {
        let dir = tempdir().unwrap();
        let final_path = dir.path().join("movie.mkv");
        fs::write(&final_path, vec![0u8; 100]).unwrap();
        fs::write(part_path_for(&final_path), vec![0u8; 500]).unwrap();
        assert_eq!(file_bytes_on_disk(&final_path), 500);
    }

    #[test]
    fn file_download_complete_requires_threshold() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("movie.mkv");
        fs::write(&path, vec![0u8; 940]).unwrap();
        assert!(!file_download_complete(&path, 1000));
        fs::write(&path, vec![0u8; 960]).unwrap();
        assert!(file_download_complete(&path, 1000));
    }
}
