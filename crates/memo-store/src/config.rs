//! Store configuration: where data and per-user configuration live.

use std::path::{Path, PathBuf};

use memo_core::defaults::{
    APP_DIR_NAME, ENV_CONFIG_DIR, ENV_DATA_DIR, PREFERENCES_FILE_NAME, SETTINGS_FILE_NAME,
    USERS_FILE_NAME,
};
use memo_core::notes_file_name;

/// Directories used by the stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Holds note files, `users.json` and `settings.json`.
    pub data_dir: PathBuf,
    /// Holds the per-user key-value configuration.
    pub config_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: platform_dir(dirs::data_dir()),
            config_dir: platform_dir(dirs::config_dir()),
        }
    }
}

fn platform_dir(base: Option<PathBuf>) -> PathBuf {
    base.unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR_NAME)
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>, config_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            config_dir: config_dir.into(),
        }
    }

    /// Data and configuration both under `root`.
    pub fn in_dir(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self::new(root.join("data"), root.join("config"))
    }

    /// Load configuration from environment variables with fallback to
    /// platform directories.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var(ENV_DATA_DIR) {
            if val.trim().is_empty() {
                tracing::warn!(value = %val, "Empty {}, using default", ENV_DATA_DIR);
            } else {
                config.data_dir = PathBuf::from(val);
            }
        }

        if let Ok(val) = std::env::var(ENV_CONFIG_DIR) {
            if val.trim().is_empty() {
                tracing::warn!(value = %val, "Empty {}, using default", ENV_CONFIG_DIR);
            } else {
                config.config_dir = PathBuf::from(val);
            }
        }

        config
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join(SETTINGS_FILE_NAME)
    }

    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(USERS_FILE_NAME)
    }

    pub fn preferences_path(&self) -> PathBuf {
        self.config_dir.join(PREFERENCES_FILE_NAME)
    }

    /// Note file for `username` in the default data directory.
    pub fn default_notes_path(&self, username: &str) -> PathBuf {
        self.data_dir.join(notes_file_name(username))
    }
}
