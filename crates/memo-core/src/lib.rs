//! # memo-core
//!
//! Core types, traits, and abstractions for StickyMemo.
//!
//! This crate provides the note model and the trait definitions that the
//! store and front-end crates depend on. It does no I/O of its own.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod markers;
pub mod models;
pub mod naming;
pub mod search;
pub mod theme;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use markers::{segments, ContentSegment};
pub use models::*;
pub use naming::{is_file_safe_username, notes_file_name, sanitize_username};
pub use search::{display_title, search_notes, NoteSearchHit};
pub use theme::{find_theme, foreground_for, NoteTheme, THEMES};
pub use traits::*;
