//! Registry behind ephemeral local references.
//!
//! A local handle keeps file bytes alive in-process until its consumer revokes it. Handles
//! created for a drop that is abandoned mid-flight are never revoked by this crate.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::entry::LocalHandle;

const HANDLE_SCHEME: &str = "blob:";

#[derive(Debug, Clone)]
pub struct LocalObject {
    pub bytes: Arc<Vec<u8>>,
    pub content_type: String,
}

#[derive(Debug, Default)]
pub struct LocalHandleRegistry {
    objects: RwLock<HashMap<LocalHandle, LocalObject>>,
}

impl LocalHandleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, bytes: Vec<u8>, content_type: &str) -> LocalHandle {
        let handle = LocalHandle(format!(
            "{}{}",
            HANDLE_SCHEME,
            uuid::Uuid::new_v4().simple()
        ));
        let mut objects = self.objects.write().await;
        objects.insert(
            handle.clone(),
            LocalObject {
                bytes: Arc::new(bytes),
                content_type: content_type.to_string(),
            },
        );
        handle
    }

    pub async fn resolve(&self, handle: &LocalHandle) -> Option<LocalObject> {
        let objects = self.objects.read().await;
        objects.get(handle).cloned()
    }

    /// Release a handle. Returns false if it was unknown or already revoked.
    pub async fn revoke(&self, handle: &LocalHandle) -> bool {
        let mut objects = self.objects.write().await;
        objects.remove(handle).is_some()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}
