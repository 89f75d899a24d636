//! Per-user note persistence with optional at-rest encryption.
//!
//! A [`NoteStore`] is bound to one username. Encryption state (flag, Argon2
//! hash, hint) and the optional data-directory override live in the
//! injected [`PreferenceStore`], never in the note file itself.

use memo_core::naming::{fields, user_key};
use memo_core::{notes_file_name, Error, Note, PreferenceStore, Result, StorageBackend};
use memo_crypto::FileFormat;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::config::StoreConfig;

/// Note file access for a single profile.
#[derive(Clone)]
pub struct NoteStore {
    username: String,
    config: StoreConfig,
    prefs: Arc<dyn PreferenceStore>,
    backend: Arc<dyn StorageBackend>,
}

impl std::fmt::Debug for NoteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteStore")
            .field("username", &self.username)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl NoteStore {
    pub fn new(
        username: impl Into<String>,
        config: StoreConfig,
        prefs: Arc<dyn PreferenceStore>,
        backend: Arc<dyn StorageBackend>,
    ) -> Self {
        Self {
            username: username.into(),
            config,
            prefs,
            backend,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    fn key(&self, field: &str) -> String {
        user_key(&self.username, field)
    }

    // Preference reads never fail the caller; errors read as "absent".
    fn pref(&self, field: &str) -> Option<String> {
        match self.prefs.get(&self.key(field)) {
            Ok(v) => v,
            Err(e) => {
                warn!(username = %self.username, field, error = %e, "store: preference read failed");
                None
            }
        }
    }

    // ─── Data location ─────────────────────────────────────────────────────

    /// The raw per-user directory override, if one is recorded.
    pub fn custom_data_dir(&self) -> Option<PathBuf> {
        self.pref(fields::DATA_PATH)
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
    }

    /// Path of this user's note file.
    ///
    /// Uses the override directory when it exists, otherwise the default data
    /// directory. Never fails.
    pub async fn resolve_data_path(&self) -> PathBuf {
        if let Some(dir) = self.custom_data_dir() {
            match self.backend.is_dir(&dir).await {
                Ok(true) => return dir.join(notes_file_name(&self.username)),
                Ok(false) => {
                    debug!(username = %self.username, path = %dir.display(), "store: override directory missing, using default");
                }
                Err(e) => {
                    warn!(username = %self.username, path = %dir.display(), error = %e, "store: override directory check failed");
                }
            }
        }
        self.config.default_notes_path(&self.username)
    }

    /// Record (`Some`) or clear (`None`) the data directory override.
    ///
    /// The directory is created on a best-effort basis. Existing notes are
    /// not moved.
    pub async fn set_data_path(&self, dir: Option<&Path>) -> Result<()> {
        match dir {
            Some(dir) => {
                if let Err(e) = self.backend.create_dir_all(dir).await {
                    warn!(username = %self.username, path = %dir.display(), error = %e, "store: could not create data directory");
                }
                let value = dir.to_string_lossy();
                self.prefs.set(&self.key(fields::DATA_PATH), &value)?;
                info!(username = %self.username, path = %dir.display(), "store: data path override set");
            }
            None => {
                self.prefs.delete(&self.key(fields::DATA_PATH))?;
                info!(username = %self.username, "store: data path override cleared");
            }
        }
        Ok(())
    }

    // ─── Load / save ───────────────────────────────────────────────────────

    /// Load all notes.
    ///
    /// A missing or empty file is an empty list. With encryption enabled a
    /// password is required; ciphertext is decrypted with it, and a plain
    /// JSON file is accepted only when the password matches the stored hash.
    #[instrument(skip(self, password), fields(subsystem = "store", op = "load", username = %self.username))]
    pub async fn try_load(&self, password: Option<&str>) -> Result<Vec<Note>> {
        let path = self.resolve_data_path().await;
        if !self.backend.exists(&path).await? {
            debug!(path = %path.display(), "store: no note file yet");
            return Ok(Vec::new());
        }

        let bytes = self.backend.read(&path).await?;
        let text = String::from_utf8(bytes)
            .map_err(|e| Error::Serialization(format!("note file is not UTF-8: {}", e)))?;
        let text = text.trim_start_matches('\u{feff}');
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let encrypted = self.is_encryption_enabled();
        let format = memo_crypto::detect_format(text);
        debug!(path = %path.display(), encrypted, file_format = ?format, "store: read note file");

        let json = if encrypted {
            let password = password.ok_or(Error::PasswordRequired)?;
            match format {
                FileFormat::Encrypted => memo_crypto::decrypt(text, password)?,
                FileFormat::PlainJson => {
                    if !self.verify_password(password) {
                        return Err(Error::WrongPassword);
                    }
                    text.to_string()
                }
                FileFormat::Unknown => {
                    return Err(Error::Serialization(
                        "note file is neither JSON nor ciphertext".to_string(),
                    ))
                }
            }
        } else {
            text.to_string()
        };

        let notes: Vec<Note> = serde_json::from_str(&json)?;
        debug!(note_count = notes.len(), "store: notes loaded");
        Ok(notes)
    }

    /// Fail-soft [`try_load`](Self::try_load): any error yields an empty list.
    pub async fn load(&self, password: Option<&str>) -> Vec<Note> {
        match self.try_load(password).await {
            Ok(notes) => notes,
            Err(e) => {
                warn!(subsystem = "store", op = "load", username = %self.username, error = %e, "Failed to load notes, using empty list");
                Vec::new()
            }
        }
    }

    /// Write all notes, encrypted when encryption is enabled and a password
    /// is supplied.
    #[instrument(skip(self, notes, password), fields(subsystem = "store", op = "save", username = %self.username, note_count = notes.len()))]
    pub async fn try_save(&self, notes: &[Note], password: Option<&str>) -> Result<()> {
        let json = serde_json::to_string_pretty(notes)?;
        let payload = match (self.is_encryption_enabled(), password) {
            (true, Some(password)) => memo_crypto::encrypt(&json, password)?,
            (true, None) => {
                warn!("store: encryption enabled but no password supplied, writing plain JSON");
                json
            }
            (false, _) => json,
        };

        let path = self.resolve_data_path().await;
        self.backend.write(&path, payload.as_bytes()).await?;
        debug!(path = %path.display(), bytes = payload.len(), "store: notes saved");
        Ok(())
    }

    /// Fail-soft [`try_save`](Self::try_save): errors are logged and dropped.
    pub async fn save(&self, notes: &[Note], password: Option<&str>) {
        if let Err(e) = self.try_save(notes, password).await {
            warn!(subsystem = "store", op = "save", username = %self.username, error = %e, "Failed to save notes");
        }
    }

    /// Delete this user's note file at its resolved path.
    pub async fn delete_file(&self) -> Result<()> {
        let path = self.resolve_data_path().await;
        self.backend.delete(&path).await
    }

    // ─── Encryption metadata ───────────────────────────────────────────────

    pub fn is_encryption_enabled(&self) -> bool {
        self.pref(fields::ENCRYPTION_ENABLED).as_deref() == Some("true")
    }

    pub fn password_hint(&self) -> Option<String> {
        self.pref(fields::PASSWORD_HINT)
            .filter(|h| !h.trim().is_empty())
    }

    /// Raw stored hash; only backups need this.
    pub fn password_hash(&self) -> Option<String> {
        self.pref(fields::PASSWORD_HASH)
            .filter(|h| !h.is_empty())
    }

    /// Check `candidate` against the stored hash. False when no hash is
    /// stored or the hash is unreadable.
    pub fn verify_password(&self, candidate: &str) -> bool {
        let Some(hash) = self.password_hash() else {
            return false;
        };
        match memo_crypto::verify_password(candidate, &hash) {
            Ok(ok) => ok,
            Err(e) => {
                warn!(username = %self.username, error = %e, "store: stored password hash is unreadable");
                false
            }
        }
    }

    /// Enable encryption with a new password and optional hint.
    ///
    /// Only the hash is stored. Existing note files are not rewritten here.
    pub fn setup_password(&self, password: &str, hint: Option<&str>) -> Result<()> {
        memo_crypto::validate_password(password)?;
        let hash = memo_crypto::hash_password(password)?;
        self.restore_encryption_settings(Some(&hash), hint, true)?;
        info!(username = %self.username, "store: encryption enabled");
        Ok(())
    }

    /// Turn encryption off and forget hash and hint.
    pub fn disable_encryption(&self) -> Result<()> {
        self.restore_encryption_settings(None, None, false)?;
        info!(username = %self.username, "store: encryption disabled");
        Ok(())
    }

    /// Write encryption metadata verbatim. Hints are trimmed; empty values
    /// are stored as absent.
    pub fn restore_encryption_settings(
        &self,
        hash: Option<&str>,
        hint: Option<&str>,
        enabled: bool,
    ) -> Result<()> {
        match hash.filter(|h| !h.is_empty()) {
            Some(h) => self.prefs.set(&self.key(fields::PASSWORD_HASH), h)?,
            None => self.prefs.delete(&self.key(fields::PASSWORD_HASH))?,
        }
        match hint.map(str::trim).filter(|h| !h.is_empty()) {
            Some(h) => self.prefs.set(&self.key(fields::PASSWORD_HINT), h)?,
            None => self.prefs.delete(&self.key(fields::PASSWORD_HINT))?,
        }
        if enabled {
            self.prefs.set(&self.key(fields::ENCRYPTION_ENABLED), "true")?;
        } else {
            self.prefs.delete(&self.key(fields::ENCRYPTION_ENABLED))?;
        }
        Ok(())
    }

    /// Drop every per-user preference (override, hash, hint, flag).
    pub fn clear_preferences(&self) -> Result<()> {
        for field in fields::ALL {
            self.prefs.delete(&self.key(field))?;
        }
        Ok(())
    }
}
