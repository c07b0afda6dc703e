use std::path::Path;

use crate::error::AppError;
use crate::models::settings::IngestSettings;

/// Read ingestion settings. Returns defaults if the file is missing or unreadable.
pub async fn load_settings(path: &Path) -> IngestSettings {
    match tokio::fs::read(path).await {
        Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            log::warn!(
                "Ignoring unparsable settings file {}: {}",
                path.display(),
                e
            );
            IngestSettings::default()
        }),
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!("Failed to read settings file {}: {}", path.display(), e);
            }
            IngestSettings::default()
        }
    }
}

/// Save ingestion settings. Persists to disk immediately.
pub async fn save_settings(path: &Path, settings: &IngestSettings) -> crate::error::Result<()> {
    let json = serde_json::to_vec_pretty(settings)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Storage(e.to_string()))?;
        }
    }
    tokio::fs::write(path, json)
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;
    Ok(())
}
