use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use crate::api::MetadataStore;
use crate::error::AppError;
use crate::models::metadata::MetadataRecord;

/// `MetadataStore` persisted as a JSON array, newest record first.
pub struct JsonMetadataStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonMetadataStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records, newest first.
    pub async fn get_all(&self) -> crate::error::Result<Vec<MetadataRecord>> {
        let _guard = self.lock.lock().await;
        load_records(&self.path).await
    }

    /// Add a record (newest first) and persist to disk immediately.
    pub async fn add_record(&self, record: MetadataRecord) -> crate::error::Result<()> {
        let _guard = self.lock.lock().await;
        let mut records = load_records(&self.path).await?;
        records.insert(0, record);
        let json = serde_json::to_vec_pretty(&records)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| AppError::Storage(e.to_string()))?;
            }
        }
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;
        Ok(())
    }
}

impl MetadataStore for JsonMetadataStore {
    async fn record(&self, record: MetadataRecord) -> crate::error::Result<()> {
        let file_name = record.file_name.clone();
        self.add_record(record)
            .await
            .map_err(|e| AppError::Metadata(format!("{}: {}", file_name, e)))
    }
}

/// Load records from disk, returning an empty vec if the file does not exist yet.
async fn load_records(path: &Path) -> crate::error::Result<Vec<MetadataRecord>> {
    match tokio::fs::read(path).await {
        Ok(bytes) if bytes.is_empty() => Ok(Vec::new()),
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(AppError::Storage(e.to_string())),
    }
}
