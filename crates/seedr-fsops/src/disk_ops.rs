//! The concrete, real-filesystem implementation of
//! [`seedr_core::DiskOps`].

use std::path::Path;

use async_trait::async_trait;
use seedr_core::DiskOps;

/// `DiskOps` backed directly by `std::fs`/`tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilesystemDiskOps;

#[async_trait]
impl DiskOps for FilesystemDiskOps {
    async fn validate_download_directory(&self, path: &Path) -> std::io::Result<()> {
        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_dir() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotADirectory,
                "download directory is not a directory",
            ));
        }
        let probe = path.join(".seedr-write-probe");
        tokio::fs::write(&probe, b"").await?;
        tokio::fs::remove_file(&probe).await?;
        Ok(())
    }

    async fn remove_path(&self, path: &Path) -> std::io::Result<()> {
        match tokio::fs::metadata(path).await {
            Ok(metadata) if metadata.is_dir() => tokio::fs::remove_dir_all(path).await,
            Ok(_) => tokio::fs::remove_file(path).await,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err),
        }
    }
}
