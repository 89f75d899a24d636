//! Session context: the boundary the GUI (or CLI) talks to.
//!
//! A [`Session`] owns the stores, the current username and the in-memory
//! password. Everything except backup import/export is fail-soft: errors are
//! logged and turned into `false`, empty lists or defaults.

use memo_core::defaults::{
    DEFAULT_USER, NOTE_CASCADE_LEFT, NOTE_CASCADE_STEP, NOTE_CASCADE_TOP,
};
use memo_core::{
    search_notes, AppSettings, Note, NoteSearchHit, PreferenceStore, Provenance, StorageBackend,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::backend::FilesystemBackend;
use crate::backup::{self, BackupError, ImportOptions};
use crate::config::StoreConfig;
use crate::note_store::NoteStore;
use crate::preferences::FilePreferences;
use crate::settings::SettingsStore;
use crate::users::UserRegistry;

pub struct Session {
    config: StoreConfig,
    registry: UserRegistry,
    settings: SettingsStore,
    store: NoteStore,
    password: Option<Zeroizing<String>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.store.username())
            .field("unlocked", &self.password.is_some())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Open a session on the local filesystem with file-backed preferences.
    pub async fn open(config: StoreConfig) -> Self {
        let prefs = Arc::new(FilePreferences::open(config.preferences_path()));
        Self::with_parts(config, prefs, Arc::new(FilesystemBackend::new())).await
    }

    /// Open a session with explicit dependencies.
    ///
    /// Ensures "Default" exists and binds to the persisted current user,
    /// falling back to (and persisting) "Default" when the pointer is unset
    /// or names an unknown profile.
    pub async fn with_parts(
        config: StoreConfig,
        prefs: Arc<dyn PreferenceStore>,
        backend: Arc<dyn StorageBackend>,
    ) -> Self {
        let registry = UserRegistry::new(config.clone(), prefs, backend.clone());
        if let Err(e) = registry.ensure_default_user().await {
            warn!(subsystem = "session", error = %e, "Failed to ensure default user");
        }

        let pointer = registry.current_user();
        let known = match &pointer {
            Some(name) => registry.contains(name).await,
            None => false,
        };
        let username = match pointer {
            Some(name) if known => name,
            other => {
                if let Some(name) = other {
                    warn!(subsystem = "session", username = %name, "Current user is not registered, using default");
                }
                if let Err(e) = registry.set_current_user(DEFAULT_USER) {
                    warn!(subsystem = "session", error = %e, "Failed to persist current user");
                }
                DEFAULT_USER.to_string()
            }
        };

        let settings = SettingsStore::new(config.clone(), backend);
        let store = registry.store_for(&username);
        info!(subsystem = "session", username = %username, encrypted = store.is_encryption_enabled(), "Session opened");

        Self {
            config,
            registry,
            settings,
            store,
            password: None,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn username(&self) -> &str {
        self.store.username()
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    fn password(&self) -> Option<&str> {
        self.password.as_ref().map(|p| p.as_str())
    }

    /// True when notes can be read and written: encryption is off or the
    /// session holds a password.
    pub fn is_unlocked(&self) -> bool {
        self.password.is_some() || !self.store.is_encryption_enabled()
    }

    fn bind(&mut self, username: &str) {
        self.store = self.registry.store_for(username);
        self.password = None;
    }

    // ─── Notes ─────────────────────────────────────────────────────────────

    pub async fn load_notes(&self) -> Vec<Note> {
        self.store.load(self.password()).await
    }

    /// Like [`load_notes`](Self::load_notes) but reports why nothing could
    /// be read, for front ends that must not overwrite an unreadable file.
    pub async fn try_load_notes(&self) -> memo_core::Result<Vec<Note>> {
        self.store.try_load(self.password()).await
    }

    /// Persist all notes. Refuses to write while an encrypted profile is
    /// locked, so plaintext never replaces ciphertext by accident.
    pub async fn save_notes(&self, notes: &[Note]) -> bool {
        if !self.is_unlocked() {
            warn!(subsystem = "session", op = "save", username = %self.username(), "Profile is locked, notes not saved");
            return false;
        }
        match self.store.try_save(notes, self.password()).await {
            Ok(()) => true,
            Err(e) => {
                warn!(subsystem = "session", op = "save", username = %self.username(), error = %e, "Failed to save notes");
                false
            }
        }
    }

    /// A new note for the current user, positioned after `existing` notes.
    pub async fn create_note(&self, existing: usize) -> Note {
        let settings = self.settings().await;
        let offset = existing as f64 * NOTE_CASCADE_STEP;
        Note::new(Provenance::detect(self.username()))
            .with_color(settings.default_note_color)
            .with_position(NOTE_CASCADE_LEFT + offset, NOTE_CASCADE_TOP + offset)
    }

    pub async fn search(&self, query: &str) -> Vec<NoteSearchHit> {
        search_notes(&self.load_notes().await, query)
    }

    // ─── Encryption ────────────────────────────────────────────────────────

    pub fn is_encryption_enabled(&self) -> bool {
        self.store.is_encryption_enabled()
    }

    pub fn password_hint(&self) -> Option<String> {
        self.store.password_hint()
    }

    /// Keep `password` for this session if it matches the stored hash.
    pub fn unlock(&mut self, password: &str) -> bool {
        if self.store.verify_password(password) {
            self.password = Some(Zeroizing::new(password.to_string()));
            info!(subsystem = "session", username = %self.username(), "Session unlocked");
            true
        } else {
            warn!(subsystem = "session", username = %self.username(), "Unlock failed");
            false
        }
    }

    /// Enable encryption (or change the password) and re-save the current
    /// notes under the new password.
    pub async fn setup_password(&mut self, password: &str, hint: Option<&str>) -> bool {
        let notes = match self.store.try_load(self.password()).await {
            Ok(notes) => notes,
            Err(e) => {
                warn!(subsystem = "session", op = "setup_password", error = %e, "Current notes unreadable, password not changed");
                return false;
            }
        };
        if let Err(e) = self.store.setup_password(password, hint) {
            warn!(subsystem = "session", op = "setup_password", error = %e, "Failed to set password");
            return false;
        }
        self.password = Some(Zeroizing::new(password.to_string()));
        if let Err(e) = self.store.try_save(&notes, self.password()).await {
            warn!(subsystem = "session", op = "setup_password", error = %e, "Failed to re-save notes encrypted");
        }
        true
    }

    /// Turn encryption off, rewrite the notes as plain JSON and forget the
    /// password. Requires an unlocked session.
    pub async fn disable_encryption(&mut self) -> bool {
        let notes = match self.store.try_load(self.password()).await {
            Ok(notes) => notes,
            Err(e) => {
                warn!(subsystem = "session", op = "disable_encryption", error = %e, "Notes unreadable, encryption left enabled");
                return false;
            }
        };
        if let Err(e) = self.store.disable_encryption() {
            warn!(subsystem = "session", op = "disable_encryption", error = %e, "Failed to disable encryption");
            return false;
        }
        self.password = None;
        if let Err(e) = self.store.try_save(&notes, None).await {
            warn!(subsystem = "session", op = "disable_encryption", error = %e, "Failed to re-save notes unencrypted");
        }
        true
    }

    // ─── Data location ─────────────────────────────────────────────────────

    pub async fn set_data_path(&self, dir: Option<&Path>) -> bool {
        match self.store.set_data_path(dir).await {
            Ok(()) => true,
            Err(e) => {
                warn!(subsystem = "session", op = "set_data_path", error = %e, "Failed to record data path");
                false
            }
        }
    }

    pub async fn current_data_path(&self) -> PathBuf {
        self.store.resolve_data_path().await
    }

    /// True when the note file lives outside the default data directory.
    pub async fn uses_custom_path(&self) -> bool {
        self.current_data_path().await != self.config.default_notes_path(self.username())
    }

    // ─── Backup ────────────────────────────────────────────────────────────

    pub async fn export_backup(&self, path: &Path) -> Result<(), BackupError> {
        backup::export_backup(&self.store, self.password(), path).await
    }

    /// Import a backup as a new profile; rebinds the session when the import
    /// switches to it.
    pub async fn import_backup(
        &mut self,
        path: &Path,
        options: &ImportOptions,
    ) -> Result<String, BackupError> {
        let imported = backup::import_backup(&self.registry, path, options).await?;
        if options.switch_to {
            self.bind(&imported);
            info!(subsystem = "session", username = %imported, "Switched to imported user");
        }
        Ok(imported)
    }

    // ─── Users ─────────────────────────────────────────────────────────────

    pub async fn list_users(&self) -> Vec<String> {
        self.registry
            .all_users()
            .await
            .into_iter()
            .map(|u| u.username)
            .collect()
    }

    /// Switch to a registered user. The password is forgotten.
    pub async fn switch_user(&mut self, username: &str) -> bool {
        let name = username.trim();
        if !self.registry.contains(name).await {
            warn!(subsystem = "session", username = %name, "Cannot switch to unknown user");
            return false;
        }
        if let Err(e) = self.registry.set_current_user(name) {
            warn!(subsystem = "session", error = %e, "Failed to persist current user");
        }
        self.bind(name);
        info!(subsystem = "session", username = %name, "Switched user");
        true
    }

    pub async fn add_user(&self, username: &str) -> bool {
        match self.registry.add_user(username).await {
            Ok(_) => true,
            Err(e) => {
                warn!(subsystem = "session", op = "add_user", error = %e, "Failed to add user");
                false
            }
        }
    }

    /// Remove a user. Removing the current user switches to "Default".
    pub async fn remove_user(&mut self, username: &str) -> bool {
        let removed = match self.registry.remove_user(username).await {
            Ok(removed) => removed,
            Err(e) => {
                warn!(subsystem = "session", op = "remove_user", error = %e, "Failed to remove user");
                false
            }
        };
        if removed && username == self.username() {
            self.switch_user(DEFAULT_USER).await;
        }
        removed
    }

    // ─── Settings ──────────────────────────────────────────────────────────

    pub async fn settings(&self) -> AppSettings {
        self.settings.load().await
    }

    pub async fn save_settings(&self, settings: &AppSettings) -> bool {
        match self.settings.try_save(settings).await {
            Ok(()) => true,
            Err(e) => {
                warn!(subsystem = "session", op = "save_settings", error = %e, "Failed to save settings");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::MemoryPreferences;
    use tempfile::TempDir;

    async fn session(dir: &TempDir) -> Session {
        Session::with_parts(
            StoreConfig::in_dir(dir.path()),
            Arc::new(MemoryPreferences::new()),
            Arc::new(FilesystemBackend::new()),
        )
        .await
    }

    #[tokio::test]
    async fn test_open_binds_default() {
        let dir = TempDir::new().unwrap();
        let s = session(&dir).await;
        assert_eq!(s.username(), "Default");
        assert_eq!(s.list_users().await, vec!["Default"]);
        assert!(s.is_unlocked());
    }

    #[tokio::test]
    async fn test_create_note_cascades() {
        let dir = TempDir::new().unwrap();
        let s = session(&dir).await;
        let first = s.create_note(0).await;
        let third = s.create_note(2).await;
        assert_eq!((first.left(), first.top()), (200.0, 80.0));
        assert_eq!((third.left(), third.top()), (240.0, 120.0));
        assert_eq!(first.color(), "#FFFF99");
        assert_eq!(first.owner(), "Default");
    }

    #[tokio::test]
    async fn test_create_note_uses_default_color_setting() {
        let dir = TempDir::new().unwrap();
        let s = session(&dir).await;
        let settings = AppSettings {
            default_note_color: "#B3E5FF".to_string(),
            ..AppSettings::default()
        };
        assert!(s.save_settings(&settings).await);
        assert_eq!(s.create_note(0).await.color(), "#B3E5FF");
    }

    #[tokio::test]
    async fn test_locked_session_refuses_save() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir).await;
        assert!(s.setup_password("abcd", None).await);
        s.switch_user("Default").await;
        assert!(!s.is_unlocked());
        assert!(!s.save_notes(&[]).await);
        assert!(!s.unlock("wrong"));
        assert!(s.unlock("abcd"));
        assert!(s.save_notes(&[]).await);
    }

    #[tokio::test]
    async fn test_switch_to_unknown_user_rejected() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir).await;
        assert!(!s.switch_user("Ghost").await);
        assert_eq!(s.username(), "Default");
    }

    #[tokio::test]
    async fn test_removing_current_user_falls_back_to_default() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir).await;
        assert!(s.add_user("Alice").await);
        assert!(s.switch_user("Alice").await);
        assert!(s.remove_user("Alice").await);
        assert_eq!(s.username(), "Default");
        assert!(!s.remove_user("Default").await);
    }

    #[tokio::test]
    async fn test_uses_custom_path() {
        let dir = TempDir::new().unwrap();
        let s = session(&dir).await;
        assert!(!s.uses_custom_path().await);
        assert!(s.set_data_path(Some(&dir.path().join("cloud"))).await);
        assert!(s.uses_custom_path().await);
        assert!(s.set_data_path(None).await);
        assert!(!s.uses_custom_path().await);
    }
}
