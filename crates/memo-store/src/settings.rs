//! Global application settings (`settings.json`).

use memo_core::{AppSettings, Result, StorageBackend};
use std::sync::Arc;
use tracing::warn;

use crate::config::StoreConfig;

#[derive(Clone)]
pub struct SettingsStore {
    config: StoreConfig,
    backend: Arc<dyn StorageBackend>,
}

impl SettingsStore {
    pub fn new(config: StoreConfig, backend: Arc<dyn StorageBackend>) -> Self {
        Self { config, backend }
    }

    /// Read settings, writing the defaults on first access.
    pub async fn try_load(&self) -> Result<AppSettings> {
        let path = self.config.settings_path();
        if !self.backend.exists(&path).await? {
            let defaults = AppSettings::default();
            self.try_save(&defaults).await?;
            return Ok(defaults);
        }
        let bytes = self.backend.read(&path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Fail-soft [`try_load`](Self::try_load): errors yield defaults.
    pub async fn load(&self) -> AppSettings {
        self.try_load().await.unwrap_or_else(|e| {
            warn!(subsystem = "settings", op = "load", error = %e, "Failed to load settings, using defaults");
            AppSettings::default()
        })
    }

    pub async fn try_save(&self, settings: &AppSettings) -> Result<()> {
        let json = serde_json::to_string_pretty(settings)?;
        self.backend
            .write(&self.config.settings_path(), json.as_bytes())
            .await
    }

    pub async fn save(&self, settings: &AppSettings) {
        if let Err(e) = self.try_save(settings).await {
            warn!(subsystem = "settings", op = "save", error = %e, "Failed to save settings");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::FilesystemBackend;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> SettingsStore {
        SettingsStore::new(
            StoreConfig::in_dir(dir.path()),
            Arc::new(FilesystemBackend::new()),
        )
    }

    #[tokio::test]
    async fn test_first_load_creates_defaults() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        assert_eq!(s.load().await, AppSettings::default());
        assert!(StoreConfig::in_dir(dir.path()).settings_path().exists());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        let settings = AppSettings {
            language: "ko".to_string(),
            background_color: "#222222".to_string(),
            ..AppSettings::default()
        };
        s.try_save(&settings).await.unwrap();
        assert_eq!(s.load().await, settings);
    }

    #[tokio::test]
    async fn test_corrupt_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let path = StoreConfig::in_dir(dir.path()).settings_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{{{").unwrap();

        let s = store(&dir);
        assert!(s.try_load().await.is_err());
        assert_eq!(s.load().await, AppSettings::default());
    }
}
