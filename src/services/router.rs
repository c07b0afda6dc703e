//! Entry router: decides, per resolved file, between remote upload and a local handle.
//!
//! Entries are processed as independent futures joined in one task. A failing entry becomes
//! `ProcessedEntry::Failed` and never cancels or delays its siblings.

use std::sync::Arc;

use futures::future::join_all;

use crate::api::{MetadataStore, UploadParams, UploadService};
use crate::models::entry::{
    storage_path_for, FailureReason, FileContents, ProcessedEntry, ResolvedFileEntry,
};
use crate::models::metadata::MetadataRecord;
use crate::models::session::Identity;
use crate::models::settings::IngestSettings;
use crate::services::handles::LocalHandleRegistry;

pub struct EntryRouter<U, M> {
    uploads: U,
    metadata: M,
    handles: Arc<LocalHandleRegistry>,
    settings: IngestSettings,
}

impl<U: UploadService, M: MetadataStore> EntryRouter<U, M> {
    pub fn new(
        uploads: U,
        metadata: M,
        handles: Arc<LocalHandleRegistry>,
        settings: IngestSettings,
    ) -> Self {
        Self {
            uploads,
            metadata,
            handles,
            settings,
        }
    }

    pub fn uploads(&self) -> &U {
        &self.uploads
    }

    pub fn metadata(&self) -> &M {
        &self.metadata
    }

    pub fn handles(&self) -> &Arc<LocalHandleRegistry> {
        &self.handles
    }

    pub fn settings(&self) -> &IngestSettings {
        &self.settings
    }

    /// Route every entry concurrently. Output order matches input order; all results are
    /// collected before returning.
    pub async fn route_all(
        &self,
        entries: &[ResolvedFileEntry],
        identity: Option<&Identity>,
    ) -> Vec<ProcessedEntry> {
        join_all(entries.iter().map(|entry| self.route_one(entry, identity))).await
    }

    pub async fn route_one(
        &self,
        entry: &ResolvedFileEntry,
        identity: Option<&Identity>,
    ) -> ProcessedEntry {
        let name = entry.path.clone();
        let contents = match entry.source.read().await {
            Ok(contents) => contents,
            Err(e) => {
                log::error!("Error accessing file {}: {}", name, e);
                return failed(name, FailureReason::FileAccess, e.to_string());
            }
        };

        match identity {
            Some(identity) if self.settings.is_cloud_eligible(&name) => {
                self.upload(identity, name, contents).await
            }
            _ => {
                let handle = self
                    .handles
                    .create(contents.bytes, &contents.content_type)
                    .await;
                ProcessedEntry::Local { name, handle }
            }
        }
    }

    async fn upload(
        &self,
        identity: &Identity,
        name: String,
        contents: FileContents,
    ) -> ProcessedEntry {
        let storage_path = storage_path_for(&self.settings.upload_root, identity, &name);
        log::info!("Uploading {} to {}...", name, storage_path);

        let params = UploadParams {
            storage_path,
            bytes: contents.bytes,
            content_type: contents.content_type.clone(),
        };
        let reference = match self.uploads.put(identity, params).await {
            Ok(reference) if !reference.download_url.is_empty() => reference,
            Ok(reference) => {
                log::error!(
                    "Upload of {} returned no download URL ({})",
                    name,
                    reference.storage_path
                );
                return failed(name, FailureReason::Upload, "empty download URL".into());
            }
            Err(e) => {
                log::error!("Error uploading {}: {}", name, e);
                return failed(name, FailureReason::Upload, e.to_string());
            }
        };
        log::info!(
            "Successfully uploaded {}. URL: {}",
            name,
            reference.download_url
        );

        let record = MetadataRecord::new(
            &identity.uid,
            &name,
            &contents.original_name,
            &reference.storage_path,
            &reference.download_url,
            contents.size,
            &contents.content_type,
        );
        if let Err(e) = self.metadata.record(record).await {
            log::error!("Error adding metadata for {}: {}", name, e);
            return failed(name, FailureReason::Metadata, e.to_string());
        }
        log::info!("Metadata added for {}", name);

        ProcessedEntry::Remote { name, reference }
    }
}

fn failed(name: String, reason: FailureReason, message: String) -> ProcessedEntry {
    ProcessedEntry::Failed {
        name,
        reason,
        message,
    }
}
