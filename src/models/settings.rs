use serde::{Deserialize, Serialize};

/// Ingestion settings persisted to settings.json.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IngestSettings {
    /// Extensions (without dot, lowercase) uploaded to remote storage when signed in.
    pub cloud_extensions: Vec<String>,
    /// First segment of every storage path.
    pub upload_root: String,
    /// Skip hidden and system files found while walking dropped directories.
    pub skip_hidden: bool,
    /// Children returned per enumeration call by the filesystem drop source.
    pub directory_batch_size: usize,
    /// Deliver an empty batch when nothing is loadable but a scene reset was requested.
    pub signal_empty_reset: bool,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            cloud_extensions: vec!["ply".to_string()],
            upload_root: "users".to_string(),
            skip_hidden: true,
            directory_batch_size: 100,
            signal_empty_reset: false,
        }
    }
}

impl IngestSettings {
    /// Whether `name` carries one of the cloud-eligible extensions (case-insensitive).
    pub fn is_cloud_eligible(&self, name: &str) -> bool {
        let leaf = name.rsplit('/').next().unwrap_or(name);
        match leaf.rsplit_once('.') {
            Some((_, ext)) => self
                .cloud_extensions
                .iter()
                .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(ext)),
            None => false,
        }
    }
}
