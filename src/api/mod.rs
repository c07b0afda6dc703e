//! External collaborator interfaces.
//!
//! Every interaction with remote storage, the metadata store, and the identity provider goes
//! through the traits defined here. Services call these traits and never construct HTTP
//! requests or storage writes directly, so backends can be swapped without touching the
//! routing logic.

use crate::error::AppError;
use crate::models::entry::RemoteReference;
use crate::models::metadata::MetadataRecord;
use crate::models::session::Identity;

#[derive(Debug)]
pub struct UploadParams {
    /// Destination path, already scoped to the identity.
    pub storage_path: String,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Remote object storage.
pub trait UploadService: Send + Sync {
    /// Store raw bytes at `params.storage_path` and return a durable reference to them.
    fn put(
        &self,
        identity: &Identity,
        params: UploadParams,
    ) -> impl std::future::Future<Output = std::result::Result<RemoteReference, AppError>> + Send;
}

/// Store of upload metadata records.
pub trait MetadataStore: Send + Sync {
    fn record(
        &self,
        record: MetadataRecord,
    ) -> impl std::future::Future<Output = std::result::Result<(), AppError>> + Send;
}

/// Source of the signed-in identity.
pub trait SessionProvider: Send + Sync {
    /// Current identity, or `None` when signed out.
    fn current_identity(&self) -> Option<Identity>;
}

pub mod session;
pub mod v1;
