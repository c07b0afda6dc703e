use serde::{Deserialize, Serialize};

/// Metadata written for every file uploaded to remote storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    /// Unique identifier (UUID v4 hex, 32 chars).
    pub id: String,
    /// Owner identity id.
    pub user_id: String,
    /// Drop-relative file name (e.g. `scans/room.ply`).
    pub file_name: String,
    /// Leaf name reported by the drop source.
    pub original_name: String,
    pub storage_path: String,
    pub download_url: String,
    /// File size in bytes.
    pub size: u64,
    pub content_type: String,
    /// Upload timestamp in RFC 3339 format (e.g., "2026-02-11T08:30:00+00:00").
    pub uploaded_at: String,
}

impl MetadataRecord {
    /// Builds a record stamped with a fresh id and the current UTC time.
    pub fn new(
        user_id: &str,
        file_name: &str,
        original_name: &str,
        storage_path: &str,
        download_url: &str,
        size: u64,
        content_type: &str,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().simple().to_string(),
            user_id: user_id.to_string(),
            file_name: file_name.to_string(),
            original_name: original_name.to_string(),
            storage_path: storage_path.to_string(),
            download_url: download_url.to_string(),
            size,
            content_type: content_type.to_string(),
            uploaded_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
