//! Per-user key-value configuration.
//!
//! [`FilePreferences`] keeps a flat JSON object in `preferences.json`;
//! [`MemoryPreferences`] is the same contract without persistence.

use memo_core::{Error, PreferenceStore, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

type Map = BTreeMap<String, String>;

fn lock(map: &Mutex<Map>) -> Result<MutexGuard<'_, Map>> {
    map.lock()
        .map_err(|_| Error::Internal("preference lock poisoned".to_string()))
}

/// Preferences persisted as a JSON string map.
///
/// The file is read once at open; every mutation rewrites it atomically.
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
    values: Mutex<Map>,
}

impl FilePreferences {
    /// Open the store at `path`. A missing file is an empty store; an
    /// unreadable or malformed one is logged and treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str::<Map>(&text).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "preferences: malformed file, starting empty");
                Map::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "preferences: read failed, starting empty");
                Map::new()
            }
        };
        debug!(path = %path.display(), entries = values.len(), "preferences: opened");
        Self {
            path,
            values: Mutex::new(values),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &Map) -> Result<()> {
        let json = serde_json::to_string_pretty(values)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut tmp_name = self.path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp = self.path.with_file_name(tmp_name);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "preferences: rename failed");
            Error::Config(e.to_string())
        })
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(lock(&self.values)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = lock(&self.values)?;
        values.insert(key.to_string(), value.to_string());
        self.persist(&values)
    }

    fn delete(&self, key: &str) -> Result<()> {
        let mut values = lock(&self.values)?;
        if values.remove(key).is_some() {
            self.persist(&values)?;
        }
        Ok(())
    }
}

/// In-memory preferences.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: Mutex<Map>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(lock(&self.values)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        lock(&self.values)?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        lock(&self.values)?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_preferences_persist_across_open() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cfg/preferences.json");

        let prefs = FilePreferences::open(&path);
        prefs.set("current_user", "Alice").unwrap();
        prefs.set("user.Alice.password_hint", "pet").unwrap();
        drop(prefs);

        let reopened = FilePreferences::open(&path);
        assert_eq!(
            reopened.get("current_user").unwrap().as_deref(),
            Some("Alice")
        );
        reopened.delete("current_user").unwrap();
        assert_eq!(reopened.get("current_user").unwrap(), None);

        let again = FilePreferences::open(&path);
        assert_eq!(again.get("current_user").unwrap(), None);
        assert_eq!(
            again.get("user.Alice.password_hint").unwrap().as_deref(),
            Some("pet")
        );
    }

    #[test]
    fn test_malformed_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "{not json").unwrap();

        let prefs = FilePreferences::open(&path);
        assert_eq!(prefs.get("anything").unwrap(), None);
        prefs.set("k", "v").unwrap();
        assert_eq!(FilePreferences::open(&path).get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_memory_preferences() {
        let prefs = MemoryPreferences::new();
        assert_eq!(prefs.get("k").unwrap(), None);
        prefs.set("k", "1").unwrap();
        prefs.set("k", "2").unwrap();
        assert_eq!(prefs.get("k").unwrap().as_deref(), Some("2"));
        prefs.delete("k").unwrap();
        prefs.delete("k").unwrap();
        assert_eq!(prefs.get("k").unwrap(), None);
    }
}
