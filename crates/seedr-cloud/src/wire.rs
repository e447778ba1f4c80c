//! Raw Seedr REST response shapes, exactly as the API returns them,
//! including its inconsistencies. Nothing outside [`crate::normalize`]
//! should ever see these types.

use serde::Deserialize;

/// A numeric field Seedr sometimes renders as a JSON number and sometimes
/// as a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FlexibleNumber {
    /// Received as a JSON number.
    Number(f64),
    /// Received as a string; parsed defensively, defaulting to 0 on
    /// failure.
    Text(String),
}

impl FlexibleNumber {
    /// Best-effort numeric value, defaulting to 0.0 on anything unparsable.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Number(value) => *value,
            Self::Text(text) => text.trim().parse().unwrap_or(0.0),
        }
    }
}

/// Root listing response body (`/folder` or `/folder/{id}`).
///
/// Seedr lists in-flight uploads under the key `torrents`, not `transfers`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFolderContents {
    #[serde(default)]
    pub torrents: Vec<RawListedTransfer>,
    #[serde(default)]
    pub folders: Vec<RawSubEntry>,
    #[serde(default)]
    pub files: Vec<RawFileEntry>,
}

/// A transfer as it appears inside a folder listing.
#[derive(Debug, Clone, Deserialize)]
pub struct RawListedTransfer {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub progress: Option<FlexibleNumber>,
    #[serde(default)]
    pub hash: Option<String>,
}

/// A sub-folder entry. Seedr occasionally names these fields `folder_id`
/// / `folder_name` instead of `id` / `name`; both are accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSubEntry {
    #[serde(alias = "folder_id")]
    pub id: i64,
    #[serde(alias = "folder_name")]
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
}

/// A file entry within a folder listing.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFileEntry {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
}

/// Response body for `POST /transfer/magnet` and `POST /transfer/file`.
///
/// Transfer *creation* uses a different field naming scheme than the
/// listing shape above.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAddedTransfer {
    pub user_torrent_id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub torrent_hash: Option<String>,
    #[serde(default)]
    pub result: Option<bool>,
}

/// Response body for `GET /user`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawUser {
    pub account: RawUserAccount,
}

/// Nested account payload within `GET /user`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawUserAccount {
    pub email: String,
    #[serde(default)]
    pub space_used: Option<u64>,
    #[serde(default)]
    pub space_max: Option<u64>,
}

/// Generic `{ "result": bool }` envelope used by delete endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct RawResultEnvelope {
    pub result: bool,
}
