//! In-memory collaborators shared by the service tests.

use std::sync::Mutex;

use crate::api::{MetadataStore, UploadParams, UploadService};
use crate::error::AppError;
use crate::models::entry::RemoteReference;
use crate::models::metadata::MetadataRecord;
use crate::models::session::Identity;

#[derive(Default)]
pub struct FakeUploadService {
    /// (uid, storage_path) per call.
    puts: Mutex<Vec<(String, String)>>,
    fail_suffix: Option<String>,
    omit_url: bool,
}

impl FakeUploadService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails every put whose storage path ends with `suffix`.
    pub fn failing_for(suffix: &str) -> Self {
        Self {
            fail_suffix: Some(suffix.to_string()),
            ..Self::default()
        }
    }

    /// Succeeds but hands back an empty download URL.
    pub fn without_url() -> Self {
        Self {
            omit_url: true,
            ..Self::default()
        }
    }

    pub fn puts(&self) -> Vec<(String, String)> {
        self.puts.lock().unwrap().clone()
    }
}

impl UploadService for FakeUploadService {
    async fn put(
        &self,
        identity: &Identity,
        params: UploadParams,
    ) -> crate::error::Result<RemoteReference> {
        self.puts
            .lock()
            .unwrap()
            .push((identity.uid.clone(), params.storage_path.clone()));
        if let Some(suffix) = &self.fail_suffix {
            if params.storage_path.ends_with(suffix.as_str()) {
                return Err(AppError::Upload("simulated outage".into()));
            }
        }
        let download_url = if self.omit_url {
            String::new()
        } else {
            format!("https://cdn.example.com/{}", params.storage_path)
        };
        Ok(RemoteReference {
            download_url,
            storage_path: params.storage_path,
        })
    }
}

#[derive(Default)]
pub struct FakeMetadataStore {
    records: Mutex<Vec<MetadataRecord>>,
    fail: bool,
}

impl FakeMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn records(&self) -> Vec<MetadataRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl MetadataStore for FakeMetadataStore {
    async fn record(&self, record: MetadataRecord) -> crate::error::Result<()> {
        if self.fail {
            return Err(AppError::Metadata("simulated write failure".into()));
        }
        self.records.lock().unwrap().push(record);
        Ok(())
    }
}
