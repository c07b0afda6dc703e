use std::path::Path;

use crate::models::settings::IngestSettings;
use crate::storage::settings;

pub async fn get_settings(path: &Path) -> IngestSettings {
    settings::load_settings(path).await
}

pub async fn save_settings(path: &Path, settings_data: IngestSettings) -> Result<(), String> {
    settings::save_settings(path, &settings_data)
        .await
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let data = IngestSettings {
            skip_hidden: false,
            ..IngestSettings::default()
        };
        save_settings(&path, data.clone()).await.unwrap();
        assert_eq!(get_settings(&path).await, data);
    }

    #[tokio::test]
    async fn save_into_file_path_reports_error_string() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let err = save_settings(&blocker.join("settings.json"), IngestSettings::default())
            .await
            .unwrap_err();
        assert!(err.starts_with("Storage error"), "got: {}", err);
    }
}
