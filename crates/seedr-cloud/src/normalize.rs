//! Absorbs Seedr's protocol quirks so every other layer sees one uniform
//! model: `torrents` vs `transfers`, `user_torrent_id` vs `id`, alternate
//! sub-folder field names, and numeric-or-string progress.

use seedr_core::{AddedTransfer, CloudInventorySnapshot, FileEntry, FolderEntry, SeedrUser, TransferEntry};

use crate::wire::{RawAddedTransfer, RawFolderContents, RawUser};

/// Normalise a root/folder listing response into the uniform snapshot.
pub fn snapshot_from_wire(raw: RawFolderContents) -> CloudInventorySnapshot {
    let transfers = raw
        .torrents
        .into_iter()
        .map(|t| TransferEntry {
            id: t.id,
            name: t.name,
            size: t.size.unwrap_or(0),
            progress: t.progress.map_or(0.0, |p| p.as_f64()),
            hash: t.hash.filter(|h| !h.is_empty()),
        })
        .collect();

    let folders = raw
        .folders
        .into_iter()
        .map(|f| FolderEntry {
            id: f.id,
            name: f.name,
            size: f.size.unwrap_or(0),
        })
        .collect();

    let files = raw
        .files
        .into_iter()
        .map(|f| FileEntry {
            id: f.id,
            name: f.name,
            size: f.size.unwrap_or(0),
        })
        .collect();

    CloudInventorySnapshot {
        transfers,
        folders,
        files,
    }
}

/// Normalise a transfer-creation response (magnet or torrent-file add).
pub fn added_transfer_from_wire(raw: RawAddedTransfer) -> AddedTransfer {
    AddedTransfer {
        id: raw.user_torrent_id,
        name: raw.title.unwrap_or_default(),
        hash: raw.torrent_hash.filter(|h| !h.is_empty()),
    }
}

/// Normalise the account-info response.
pub fn user_from_wire(raw: RawUser) -> SeedrUser {
    SeedrUser {
        email: raw.account.email,
        space_used: raw.account.space_used.unwrap_or(0),
        space_max: raw.account.space_max.unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::{FlexibleNumber, RawFileEntry, RawListedTransfer, RawSubEntry};

    #[test]
    fn normalizes_torrents_key_into_transfers() {
        let raw = RawFolderContents {
            torrents: vec![RawListedTransfer {
                id: 1,
                name: "Movie".into(),
                size: Some(1000),
                progress: Some(FlexibleNumber::Text("50".into())),
                hash: Some("ABC123".into()),
            }],
            folders: vec![],
            files: vec![],
        };

        let snapshot = snapshot_from_wire(raw);
        assert_eq!(snapshot.transfers.len(), 1);
        assert_eq!(snapshot.transfers[0].progress, 50.0);
    }

    #[test]
    fn accepts_folder_id_alias() {
        let json = r#"{"folder_id": 7, "folder_name": "Season 1", "size": 42}"#;
        let entry: RawSubEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, 7);
        assert_eq!(entry.name, "Season 1");
    }

    #[test]
    fn accepts_plain_id_name() {
        let json = r#"{"id": 7, "name": "Season 1"}"#;
        let entry: RawSubEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, 7);
        assert_eq!(entry.name, "Season 1");
    }

    #[test]
    fn defaults_missing_size_to_zero() {
        let entry = RawFileEntry {
            id: 1,
            name: "f".into(),
            size: None,
        };
        let normalized = FileEntry {
            id: entry.id,
            name: entry.name,
            size: entry.size.unwrap_or(0),
        };
        assert_eq!(normalized.size, 0);
    }

    #[test]
    fn added_transfer_uses_creation_field_names() {
        let raw = RawAddedTransfer {
            user_torrent_id: 99,
            title: Some("New Upload".into()),
            torrent_hash: Some("DEADBEEF".into()),
            result: Some(true),
        };
        let added = added_transfer_from_wire(raw);
        assert_eq!(added.id, 99);
        assert_eq!(added.hash.as_deref(), Some("DEADBEEF"));
    }
}
