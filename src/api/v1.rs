//! HttpUploadService: `UploadService` backed by a plain HTTP object store.
//!
//! Objects are written with `PUT {base_url}/{storage_path}`; the store answers with a JSON body
//! carrying the public download URL.

use super::{UploadParams, UploadService};
use crate::error::AppError;
use crate::models::entry::RemoteReference;
use crate::models::session::Identity;

const USER_AGENT: &str = "DropIngest/0.1.0";
const UPLOAD_TIMEOUT_SECS: u64 = 300;

pub struct HttpUploadService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpUploadService {
    pub fn new(base_url: &str) -> crate::error::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(UPLOAD_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub(crate) fn object_url(&self, storage_path: &str) -> String {
        format!("{}/{}", self.base_url, storage_path.trim_start_matches('/'))
    }

    /// Pull the download URL out of the store's response body.
    /// Separated as pub(crate) for unit testing without network.
    pub(crate) fn extract_download_url(body: &serde_json::Value) -> crate::error::Result<String> {
        body["downloadUrl"]
            .as_str()
            .or_else(|| body["url"].as_str())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .ok_or_else(|| {
                AppError::Upload(format!("Response carried no download URL: {}", body))
            })
    }
}

impl UploadService for HttpUploadService {
    async fn put(
        &self,
        identity: &Identity,
        params: UploadParams,
    ) -> crate::error::Result<RemoteReference> {
        let url = self.object_url(&params.storage_path);
        log::debug!("PUT {} for uid={}", url, identity.uid);

        let resp = self
            .client
            .put(&url)
            .header(reqwest::header::CONTENT_TYPE, params.content_type)
            .body(params.bytes)
            .send()
            .await
            .map_err(|e| AppError::Upload(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::Upload(format!(
                "put failed: status={}, path={}",
                status.as_u16(),
                params.storage_path
            )));
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| AppError::Upload(format!("Invalid response body: {}", e)))?;
        let download_url = Self::extract_download_url(&body)?;

        Ok(RemoteReference {
            download_url,
            storage_path: params.storage_path,
        })
    }
}
