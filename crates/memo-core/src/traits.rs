//! Core traits for StickyMemo abstractions.
//!
//! Stores receive these as injected dependencies so tests can swap the
//! filesystem and the per-user configuration for in-memory versions.

use async_trait::async_trait;
use std::path::Path;

use crate::error::Result;

// =============================================================================
// STORAGE
// =============================================================================

/// Byte storage addressed by filesystem path.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Write `data` to `path`, replacing any previous content atomically.
    /// Parent directories are created as needed.
    async fn write(&self, path: &Path, data: &[u8]) -> Result<()>;

    /// Read the full content at `path`.
    async fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Delete `path`. Deleting a missing file is not an error.
    async fn delete(&self, path: &Path) -> Result<()>;

    /// Check if a file exists at `path`.
    async fn exists(&self, path: &Path) -> Result<bool>;

    /// Check if a directory exists at `path`.
    async fn is_dir(&self, path: &Path) -> Result<bool>;

    /// Create `path` and its parents.
    async fn create_dir_all(&self, path: &Path) -> Result<()>;
}

// =============================================================================
// PER-USER CONFIGURATION
// =============================================================================

/// Flat string key-value store for small per-user settings.
///
/// Holds the current-user pointer and per-profile data-path overrides and
/// password metadata. Values are opaque strings.
pub trait PreferenceStore: Send + Sync {
    /// Read a value. `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> Result<()>;
}
