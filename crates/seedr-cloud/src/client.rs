//! The `reqwest`-backed Seedr REST client (C1).

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use seedr_core::{AddedTransfer, CloudClient, CloudError, CloudInventorySnapshot, CloudResult, SeedrUser};
use tokio::io::AsyncWriteExt;

use crate::classify::{classify_status, classify_transport};
use crate::normalize::{added_transfer_from_wire, snapshot_from_wire, user_from_wire};
use crate::retry::with_retry;
use crate::wire::{RawAddedTransfer, RawFolderContents, RawResultEnvelope, RawUser};

const BASE_URL: &str = "https://www.seedr.cc/rest";

/// Attempt counts used for idempotent calls: lists and deletes are safe to
/// retry, file downloads get a small retry budget, mutating transfer
/// creation is never retried.
const LIST_DELETE_ATTEMPTS: u32 = 2;
const DOWNLOAD_ATTEMPTS: u32 = 2;
const NO_RETRY: u32 = 0;

/// Credentials and transport for talking to `seedr.cc`.
#[derive(Clone)]
pub struct SeedrClient {
    http: reqwest::Client,
    base_url: String,
    email: String,
    password: String,
}

impl SeedrClient {
    /// Build a client with a 30-minute per-stream timeout on the
    /// underlying connection pool, matching the file-stream timeout in
    /// the concurrency model.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> CloudResult<Self> {
        Self::with_base_url(BASE_URL, email, password)
    }

    /// Build a client against a custom base URL (used by tests against a
    /// local mock server).
    pub fn with_base_url(
        base_url: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> CloudResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30 * 60))
            .build()
            .map_err(classify_transport)?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            email: email.into(),
            password: password.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.basic_auth(&self.email, Some(&self.password))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        operation: &'static str,
        attempts: u32,
    ) -> CloudResult<T> {
        with_retry(attempts, || async {
            let response = self
                .authed(self.http.get(self.url(path)))
                .send()
                .await
                .map_err(classify_transport)?;
            let status = response.status();
            if !status.is_success() {
                return Err(classify_status(status, operation));
            }
            let bytes = response.bytes().await.map_err(classify_transport)?;
            if bytes.is_empty() {
                return Err(CloudError::ProtocolError { operation });
            }
            serde_json::from_slice(&bytes).map_err(|_| CloudError::ProtocolError { operation })
        })
        .await
    }

    async fn delete_result(&self, path: &str, operation: &'static str) -> CloudResult<()> {
        with_retry(LIST_DELETE_ATTEMPTS, || async {
            let response = self
                .authed(self.http.delete(self.url(path)))
                .send()
                .await
                .map_err(classify_transport)?;
            let status = response.status();
            if !status.is_success() {
                return Err(classify_status(status, operation));
            }
            let bytes = response.bytes().await.map_err(classify_transport)?;
            if bytes.is_empty() {
                return Err(CloudError::ProtocolError { operation });
            }
            let envelope: RawResultEnvelope = serde_json::from_slice(&bytes)
                .map_err(|_| CloudError::ProtocolError { operation })?;
            if !envelope.result {
                return Err(CloudError::ProtocolError { operation });
            }
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl CloudClient for SeedrClient {
    async fn get_folder_contents(&self, folder_id: Option<i64>) -> CloudResult<CloudInventorySnapshot> {
        let path = match folder_id {
            Some(id) => format!("/folder/{id}"),
            None => "/folder".to_string(),
        };
        let raw: RawFolderContents = self.get_json(&path, "get_folder_contents", LIST_DELETE_ATTEMPTS).await?;
        Ok(snapshot_from_wire(raw))
    }

    async fn add_magnet(&self, magnet: &str) -> CloudResult<AddedTransfer> {
        let magnet = magnet.to_string();
        let raw: RawAddedTransfer = with_retry(NO_RETRY, || async {
            let response = self
                .authed(self.http.post(self.url("/transfer/magnet")))
                .form(&[("magnet", magnet.as_str())])
                .send()
                .await
                .map_err(classify_transport)?;
            let status = response.status();
            if !status.is_success() {
                return Err(classify_status(status, "add_magnet"));
            }
            response
                .json::<RawAddedTransfer>()
                .await
                .map_err(|_| CloudError::ProtocolError { operation: "add_magnet" })
        })
        .await?;
        if raw.result == Some(false) {
            return Err(CloudError::ProtocolError { operation: "add_magnet" });
        }
        Ok(added_transfer_from_wire(raw))
    }

    async fn add_torrent_file(&self, filename: &str, bytes: &[u8]) -> CloudResult<AddedTransfer> {
        let raw: RawAddedTransfer = with_retry(NO_RETRY, || async {
            let form = multipart::Form::new().part(
                "file",
                multipart::Part::bytes(bytes.to_vec()).file_name(filename.to_string()),
            );
            let response = self
                .authed(self.http.post(self.url("/transfer/file")))
                .multipart(form)
                .send()
                .await
                .map_err(classify_transport)?;
            let status = response.status();
            if !status.is_success() {
                return Err(classify_status(status, "add_torrent_file"));
            }
            response
                .json::<RawAddedTransfer>()
                .await
                .map_err(|_| CloudError::ProtocolError {
                    operation: "add_torrent_file",
                })
        })
        .await?;
        if raw.result == Some(false) {
            return Err(CloudError::ProtocolError {
                operation: "add_torrent_file",
            });
        }
        Ok(added_transfer_from_wire(raw))
    }

    async fn delete_transfer(&self, id: i64) -> CloudResult<()> {
        self.delete_result(&format!("/torrent/{id}"), "delete_transfer").await
    }

    async fn delete_folder(&self, id: i64) -> CloudResult<()> {
        self.delete_result(&format!("/folder/{id}"), "delete_folder").await
    }

    async fn delete_file(&self, id: i64) -> CloudResult<()> {
        self.delete_result(&format!("/file/{id}"), "delete_file").await
    }

    async fn get_user(&self) -> CloudResult<SeedrUser> {
        let raw: RawUser = self.get_json("/user", "get_user", LIST_DELETE_ATTEMPTS).await?;
        Ok(user_from_wire(raw))
    }

    async fn download_file_to_path(&self, file_id: i64, path: &Path) -> CloudResult<()> {
        let mut part_path = path.as_os_str().to_owned();
        part_path.push(".part");
        let part_path = std::path::PathBuf::from(part_path);

        let result = with_retry(DOWNLOAD_ATTEMPTS, || {
            let part_path = part_path.clone();
            async move {
                let response = self
                    .authed(self.http.get(self.url(&format!("/file/{file_id}"))))
                    .send()
                    .await
                    .map_err(classify_transport)?;
                let status = response.status();
                if !status.is_success() {
                    return Err(classify_status(status, "download_file_to_path"));
                }

                let mut file = tokio::fs::File::create(&part_path)
                    .await
                    .map_err(|source| CloudError::Io { source })?;

                let mut response = response;
                loop {
                    let chunk = response.chunk().await.map_err(classify_transport)?;
                    let Some(chunk) = chunk else { break };
                    file.write_all(&chunk)
                        .await
                        .map_err(|source| CloudError::Io { source })?;
                }
                file.flush().await.map_err(|source| CloudError::Io { source })?;
                Ok(())
            }
        })
        .await;

        match result {
            Ok(()) => {
                if path.exists() {
                    tokio::fs::remove_file(path)
                        .await
                        .map_err(|source| CloudError::Io { source })?;
                }
                tokio::fs::rename(&part_path, path)
                    .await
                    .map_err(|source| CloudError::Io { source })?;
                Ok(())
            }
            Err(err) => {
                let _ = tokio::fs::remove_file(&part_path).await;
                Err(err)
            }
        }
    }
}
