//! The submission contract: what callers hand the adapter to start a grab.

/// A release to submit to the cloud, as handed in by the surrounding
/// pipeline. The info-hash is resolved upstream (magnet `xt=urn:btih:...`
/// or `.torrent` parsing); this adapter only ever uppercases and stores it.
#[derive(Debug, Clone)]
pub struct Release {
    /// BitTorrent info-hash, if already known to the caller.
    pub info_hash: Option<String>,
    /// The payload to upload: either a magnet URI or raw `.torrent` bytes.
    pub payload: ReleasePayload,
    /// Display title supplied by the caller (used only as a fallback).
    pub title: String,
}

/// The two ways a release can be handed to the cloud proxy.
#[derive(Debug, Clone)]
pub enum ReleasePayload {
    /// A magnet URI.
    Magnet(String),
    /// Raw bytes of a `.torrent` file plus the filename Seedr should see.
    TorrentFile {
        /// Filename presented in the multipart upload.
        filename: String,
        /// Raw `.torrent` file contents.
        bytes: Vec<u8>,
    },
}
