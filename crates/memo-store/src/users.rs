//! User profile registry (`users.json`) and the current-user pointer.

use memo_core::defaults::DEFAULT_USER;
use memo_core::naming::CURRENT_USER_KEY;
use memo_core::{
    is_file_safe_username, notes_file_name, Error, PreferenceStore, Result, StorageBackend,
    UserProfile,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::note_store::NoteStore;

/// Registry of known profiles.
#[derive(Clone)]
pub struct UserRegistry {
    config: StoreConfig,
    prefs: Arc<dyn PreferenceStore>,
    backend: Arc<dyn StorageBackend>,
}

impl UserRegistry {
    pub fn new(
        config: StoreConfig,
        prefs: Arc<dyn PreferenceStore>,
        backend: Arc<dyn StorageBackend>,
    ) -> Self {
        Self {
            config,
            prefs,
            backend,
        }
    }

    pub fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    /// A note store for `username` sharing this registry's dependencies.
    pub fn store_for(&self, username: &str) -> NoteStore {
        NoteStore::new(
            username,
            self.config.clone(),
            self.prefs.clone(),
            self.backend.clone(),
        )
    }

    /// Read `users.json`. Missing or unreadable files read as empty.
    async fn load(&self) -> Vec<UserProfile> {
        let path = self.config.users_path();
        match self.backend.exists(&path).await {
            Ok(true) => {}
            Ok(false) => return Vec::new(),
            Err(e) => {
                warn!(subsystem = "users", path = %path.display(), error = %e, "Failed to check users file");
                return Vec::new();
            }
        }
        let parsed = match self.backend.read(&path).await {
            Ok(bytes) => serde_json::from_slice::<Vec<UserProfile>>(&bytes).map_err(Error::from),
            Err(e) => Err(e),
        };
        parsed.unwrap_or_else(|e| {
            warn!(subsystem = "users", path = %path.display(), error = %e, "Failed to read users file, treating as empty");
            Vec::new()
        })
    }

    async fn save(&self, users: &[UserProfile]) -> Result<()> {
        let json = serde_json::to_string_pretty(users)?;
        self.backend
            .write(&self.config.users_path(), json.as_bytes())
            .await
    }

    /// Make sure "Default" exists, inserting it first if absent.
    pub async fn ensure_default_user(&self) -> Result<()> {
        let mut users = self.load().await;
        if users.iter().any(UserProfile::is_default) {
            return Ok(());
        }
        users.insert(0, UserProfile::new(DEFAULT_USER));
        self.save(&users).await?;
        info!(subsystem = "users", "Created default user");
        Ok(())
    }

    /// All profiles, "Default" first, then insertion order.
    pub async fn all_users(&self) -> Vec<UserProfile> {
        let users = self.load().await;
        let (mut default, rest): (Vec<_>, Vec<_>) =
            users.into_iter().partition(UserProfile::is_default);
        default.truncate(1);
        default.extend(rest);
        default
    }

    /// Case-sensitive membership test.
    pub async fn contains(&self, username: &str) -> bool {
        self.load().await.iter().any(|u| u.username == username)
    }

    /// Another registered profile whose note file name equals the one
    /// `username` would use.
    pub async fn note_file_owner(&self, username: &str) -> Option<String> {
        file_name_owner(&self.load().await, username)
    }

    /// Register a profile. Returns the trimmed name; existing names are a
    /// no-op.
    ///
    /// New names must be usable as file names verbatim and must not map to
    /// a note file another profile already uses.
    pub async fn add_user(&self, username: &str) -> Result<String> {
        let name = username.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("username must not be empty".to_string()));
        }

        let mut users = self.load().await;
        if users.iter().any(|u| u.username == name) {
            debug!(subsystem = "users", username = %name, "User already registered");
            return Ok(name.to_string());
        }
        if !is_file_safe_username(name) {
            return Err(Error::InvalidInput(format!(
                "username '{}' contains characters not allowed in file names",
                name
            )));
        }
        if let Some(owner) = file_name_owner(&users, name) {
            return Err(Error::InvalidInput(format!(
                "username '{}' would share a note file with '{}'",
                name, owner
            )));
        }
        users.push(UserProfile::new(name));
        self.save(&users).await?;
        info!(subsystem = "users", username = %name, "User added");
        Ok(name.to_string())
    }

    /// Remove a profile, its note file and its per-user preferences.
    ///
    /// Returns `Ok(false)` for "Default" (never removable) and for unknown
    /// names.
    pub async fn remove_user(&self, username: &str) -> Result<bool> {
        if username == DEFAULT_USER {
            warn!(subsystem = "users", "Refusing to remove the default user");
            return Ok(false);
        }

        let mut users = self.load().await;
        let before = users.len();
        users.retain(|u| u.username != username);
        if users.len() == before {
            return Ok(false);
        }
        self.save(&users).await?;

        // Best effort: the file path depends on the override, so resolve it
        // before the preferences are cleared.
        let store = self.store_for(username);
        if let Err(e) = store.delete_file().await {
            warn!(subsystem = "users", username = %username, error = %e, "Failed to delete note file");
        }
        if let Err(e) = store.clear_preferences() {
            warn!(subsystem = "users", username = %username, error = %e, "Failed to clear user preferences");
        }

        info!(subsystem = "users", username = %username, "User removed");
        Ok(true)
    }

    /// The persisted current-user pointer.
    pub fn current_user(&self) -> Option<String> {
        match self.prefs.get(CURRENT_USER_KEY) {
            Ok(v) => v.filter(|s| !s.is_empty()),
            Err(e) => {
                warn!(subsystem = "users", error = %e, "Failed to read current user");
                None
            }
        }
    }

    pub fn set_current_user(&self, username: &str) -> Result<()> {
        self.prefs.set(CURRENT_USER_KEY, username)
    }
}

fn file_name_owner(users: &[UserProfile], username: &str) -> Option<String> {
    let file = notes_file_name(username);
    users
        .iter()
        .find(|u| u.username != username && notes_file_name(&u.username) == file)
        .map(|u| u.username.clone())
}
