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

//! `reqwest`-backed client for the Seedr.cc REST API (C1): the only
//! component in this workspace that speaks the remote wire protocol.
//!
//! Protocol shape mismatches (`torrents` vs `transfers`, alternate
//! sub-folder field names, numeric-or-string progress) are absorbed inside
//! [`normalize`] so every other crate only ever sees
//! [`seedr_core::CloudInventorySnapshot`].

mod classify;
pub mod client;
pub mod normalize;
mod retry;
pub mod wire;

pub use client::SeedrClient;
pub use retry::with_retry;

#[cfg(test)]
mod integration_tests {
    use seedr_core::CloudClient;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::SeedrClient;

    #[tokio::test]
    async fn get_folder_contents_normalizes_torrents_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/folder"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "torrents": [{"id": 1, "name": "Movie", "size": 1000, "progress": "50", "hash": "ABC"}],
                "folders": [],
                "files": [],
            })))
            .mount(&server)
            .await;

        let client = SeedrClient::with_base_url(server.uri(), "user@example.com", "secret").unwrap();
        let snapshot = client.get_folder_contents(None).await.unwrap();
        assert_eq!(snapshot.transfers.len(), 1);
        assert_eq!(snapshot.transfers[0].progress, 50.0);
        assert_eq!(snapshot.transfers[0].hash.as_deref(), Some("ABC"));
    }

    #[tokio::test]
    async fn unauthorized_is_classified_as_auth_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = SeedrClient::with_base_url(server.uri(), "user@example.com", "wrong").unwrap();
        let err = client.get_user().await.unwrap_err();
        assert!(matches!(err, seedr_core::CloudError::AuthFailure));
    }

    #[tokio::test]
    async fn server_error_is_retried_then_reported_exhausted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = SeedrClient::with_base_url(server.uri(), "user@example.com", "secret").unwrap();
        let err = client.get_user().await.unwrap_err();
        assert!(matches!(
            err,
            seedr_core::CloudError::RetriesExhausted { .. }
        ));
    }

    #[tokio::test]
    async fn download_file_streams_through_part_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/file/42"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8; 4096]))
            .mount(&server)
            .await;

        let client = SeedrClient::with_base_url(server.uri(), "user@example.com", "secret").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("movie.mkv");
        client.download_file_to_path(42, &dest).await.unwrap();

        assert!(dest.exists());
        assert!(!dest.with_extension("mkv.part").exists());
        assert_eq!(std::fs::metadata(&dest).unwrap().len(), 4096);
    }

    #[tokio::test]
    async fn failed_download_cleans_up_part_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/file/7"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = SeedrClient::with_base_url(server.uri(), "user@example.com", "secret").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("movie.mkv");
        let result = client.download_file_to_path(7, &dest).await;

        assert!(result.is_err());
        assert!(!dest.exists());
        let mut part = dest.clone().into_os_string();
        part.push(".part");
        assert!(!std::path::Path::new(&part).exists());
    }
}
