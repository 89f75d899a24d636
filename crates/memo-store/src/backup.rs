//! Portable per-user backups (`*.jmb`).
//!
//! A backup bundles one profile's notes (always as plain JSON inside the
//! record) with its password hash, hint and encryption flag. The password
//! itself is never written.

use chrono::{DateTime, TimeZone};
use memo_core::defaults::{BACKUP_EXTENSION, BACKUP_FILE_PREFIX};
use memo_core::{is_file_safe_username, BackupRecord, Error as CoreError};
use std::fmt::Display;
use std::path::Path;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::note_store::NoteStore;
use crate::users::UserRegistry;

/// Errors surfaced to the user from export and import.
#[derive(Error, Debug)]
pub enum BackupError {
    /// The backup file could not be read
    #[error("Backup file could not be read: {0}")]
    Unreadable(String),

    /// The backup file is not a valid backup record
    #[error("Backup file is malformed: {0}")]
    Malformed(String),

    /// The profile name is empty or cannot be used as a file name
    #[error("Backup has no usable user name")]
    InvalidTarget,

    /// A profile with the target name already exists
    #[error("A user named '{0}' already exists")]
    NameCollision(String),

    /// Encryption is enabled and no password was given
    #[error("Password required")]
    PasswordRequired,

    /// The given password does not match
    #[error("Wrong password")]
    WrongPassword,

    /// The profile's notes could not be read for export
    #[error("Notes could not be loaded: {0}")]
    Load(String),

    /// Writing the backup or the imported profile failed
    #[error("Write failed: {0}")]
    Write(String),
}

impl BackupError {
    fn from_load(e: CoreError) -> Self {
        match e {
            CoreError::PasswordRequired => BackupError::PasswordRequired,
            CoreError::WrongPassword => BackupError::WrongPassword,
            other => BackupError::Load(other.to_string()),
        }
    }

    fn write(e: impl Display) -> Self {
        BackupError::Write(e.to_string())
    }
}

/// How an import should be applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportOptions {
    /// Import under this name instead of the one in the record.
    pub target_name: Option<String>,
    /// Make the imported profile the current user.
    pub switch_to: bool,
}

/// `StickyMemo_Backup_<yyyyMMdd_HHmmss>.jmb` for the given time.
pub fn default_backup_file_name<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "{}_{}.{}",
        BACKUP_FILE_PREFIX,
        now.format("%Y%m%d_%H%M%S"),
        BACKUP_EXTENSION
    )
}

/// Export `store`'s profile to `path`.
///
/// With encryption enabled the password must be supplied and must verify.
/// Load errors are reported, not collapsed to an empty backup.
#[instrument(skip(store, password), fields(subsystem = "backup", op = "export", username = %store.username(), path = %path.display()))]
pub async fn export_backup(
    store: &NoteStore,
    password: Option<&str>,
    path: &Path,
) -> Result<(), BackupError> {
    let encryption_enabled = store.is_encryption_enabled();
    if encryption_enabled {
        let password = password.ok_or(BackupError::PasswordRequired)?;
        if !store.verify_password(password) {
            return Err(BackupError::WrongPassword);
        }
    }

    let notes = store
        .try_load(password)
        .await
        .map_err(BackupError::from_load)?;

    let record = BackupRecord {
        username: store.username().to_string(),
        notes,
        password_hash: store.password_hash(),
        password_hint: store.password_hint(),
        encryption_enabled,
    };
    let json = serde_json::to_string_pretty(&record).map_err(BackupError::write)?;
    store
        .backend()
        .write(path, json.as_bytes())
        .await
        .map_err(BackupError::write)?;

    info!(note_count = record.notes.len(), encrypted = encryption_enabled, "Backup exported");
    Ok(())
}

/// Read and validate a backup record without applying it.
pub async fn read_backup(registry: &UserRegistry, path: &Path) -> Result<BackupRecord, BackupError> {
    let bytes = registry
        .backend()
        .read(path)
        .await
        .map_err(|e| BackupError::Unreadable(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| BackupError::Malformed(e.to_string()))
}

/// Import a backup as a new profile. Returns the imported profile name.
///
/// Steps run in order: notes written unencrypted, encryption metadata
/// restored, profile registered, current user switched if requested. A
/// failure stops the sequence, so nothing is registered or switched after
/// a failed write.
#[instrument(skip(registry, options), fields(subsystem = "backup", op = "import", path = %path.display()))]
pub async fn import_backup(
    registry: &UserRegistry,
    path: &Path,
    options: &ImportOptions,
) -> Result<String, BackupError> {
    let record = read_backup(registry, path).await?;

    let target = options
        .target_name
        .as_deref()
        .unwrap_or(&record.username)
        .trim()
        .to_string();
    if !is_file_safe_username(&target) {
        return Err(BackupError::InvalidTarget);
    }
    if registry.contains(&target).await {
        return Err(BackupError::NameCollision(target));
    }
    // A different profile already writes the note file this name maps to.
    if let Some(owner) = registry.note_file_owner(&target).await {
        warn!(username = %target, "Import target shares a note file with user {}", owner);
        return Err(BackupError::NameCollision(target));
    }

    let store = registry.store_for(&target);
    // Leftovers of an earlier profile with this name must not redirect or
    // encrypt the write below.
    if let Err(e) = store.clear_preferences() {
        warn!(username = %target, error = %e, "Failed to clear stale preferences before import");
    }

    store
        .try_save(&record.notes, None)
        .await
        .map_err(BackupError::write)?;
    store
        .restore_encryption_settings(
            record.password_hash.as_deref(),
            record.password_hint.as_deref(),
            record.encryption_enabled,
        )
        .map_err(BackupError::write)?;

    registry.add_user(&target).await.map_err(BackupError::write)?;
    if options.switch_to {
        registry
            .set_current_user(&target)
            .map_err(BackupError::write)?;
    }

    info!(username = %target, note_count = record.notes.len(), encrypted = record.encryption_enabled, "Backup imported");
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_default_backup_file_name() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 7, 9, 5, 1).unwrap();
        assert_eq!(
            default_backup_file_name(&ts),
            "StickyMemo_Backup_20250307_090501.jmb"
        );
    }

    #[test]
    fn test_load_errors_map_to_password_variants() {
        assert!(matches!(
            BackupError::from_load(CoreError::PasswordRequired),
            BackupError::PasswordRequired
        ));
        assert!(matches!(
            BackupError::from_load(CoreError::WrongPassword),
            BackupError::WrongPassword
        ));
        assert!(matches!(
            BackupError::from_load(CoreError::Crypto("x".into())),
            BackupError::Load(_)
        ));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            BackupError::NameCollision("Alice".into()).to_string(),
            "A user named 'Alice' already exists"
        );
        assert_eq!(
            BackupError::InvalidTarget.to_string(),
            "Backup has no usable user name"
        );
    }
}
