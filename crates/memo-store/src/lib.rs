//! # memo-store
//!
//! File-backed persistence for StickyMemo: per-user note files with optional
//! encryption, the user registry, global settings, backups, and the
//! [`Session`] that ties them together for a front end.
//!
//! ## Example
//!
//! ```rust,ignore
//! use memo_store::{Session, StoreConfig};
//!
//! let mut session = Session::open(StoreConfig::from_env()).await;
//! if session.is_encryption_enabled() && !session.unlock("secret") {
//!     return;
//! }
//! let mut notes = session.load_notes().await;
//! notes.push(session.create_note(notes.len()).await.with_content("Buy milk"));
//! session.save_notes(&notes).await;
//! ```

pub mod backend;
pub mod backup;
pub mod config;
pub mod note_store;
pub mod preferences;
pub mod session;
pub mod settings;
pub mod users;

pub use backend::FilesystemBackend;
pub use backup::{
    default_backup_file_name, export_backup, import_backup, read_backup, BackupError,
    ImportOptions,
};
pub use config::StoreConfig;
pub use note_store::NoteStore;
pub use preferences::{FilePreferences, MemoryPreferences};
pub use session::Session;
pub use settings::SettingsStore;
pub use users::UserRegistry;
