//! Centralized default constants for StickyMemo.
//!
//! Every crate references these instead of defining its own magic values.
//! Organized by domain area.

// =============================================================================
// APPLICATION
// =============================================================================

/// Directory name used under the platform data/config directories.
pub const APP_DIR_NAME: &str = "StickyMemo";

/// Prefix for generated backup file names.
pub const BACKUP_FILE_PREFIX: &str = "StickyMemo_Backup";

/// Backup file extension (without the dot).
pub const BACKUP_EXTENSION: &str = "jmb";

// =============================================================================
// FILES
// =============================================================================

/// Note file for the no-name user.
pub const NOTES_FILE_NAME: &str = "notes.json";

/// Prefix of per-user note files (`notes_<user>.json`).
pub const NOTES_FILE_PREFIX: &str = "notes_";

/// Global settings file.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// User list file.
pub const USERS_FILE_NAME: &str = "users.json";

/// Per-user key-value configuration file.
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

// =============================================================================
// USERS
// =============================================================================

/// Name of the profile that always exists and cannot be removed.
pub const DEFAULT_USER: &str = "Default";

// =============================================================================
// NOTES
// =============================================================================

/// Smallest allowed font size.
pub const FONT_SIZE_MIN: f64 = 8.0;

/// Largest allowed font size.
pub const FONT_SIZE_MAX: f64 = 48.0;

/// Font size for new notes.
pub const FONT_SIZE_DEFAULT: f64 = 14.0;

/// Width of a new note.
pub const NOTE_WIDTH: f64 = 250.0;

/// Height of a new note.
pub const NOTE_HEIGHT: f64 = 200.0;

/// Characters kept from the first content line when deriving a title.
pub const TITLE_MAX_CHARS: usize = 20;

/// Suffix appended to truncated titles.
pub const TITLE_ELLIPSIS: &str = "...";

/// Display title for notes with neither title nor content.
pub const UNTITLED_NOTE: &str = "New Note";

/// Position of the first new note; each further note cascades by the step.
pub const NOTE_CASCADE_LEFT: f64 = 200.0;
pub const NOTE_CASCADE_TOP: f64 = 80.0;
pub const NOTE_CASCADE_STEP: f64 = 20.0;

// =============================================================================
// COLORS / SETTINGS
// =============================================================================

/// Canvas background.
pub const BACKGROUND_COLOR: &str = "#F5F5F5";

/// Background of new notes ("Classic Yellow").
pub const NOTE_COLOR: &str = "#FFFF99";

/// Text color on light notes.
pub const NOTE_TEXT_COLOR: &str = "#000000";

/// Text color on dark notes.
pub const NOTE_TEXT_COLOR_LIGHT: &str = "#FFFFFF";

/// UI language code.
pub const LANGUAGE: &str = "en";

/// Languages with string tables in the GUI.
pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "ko"];

// =============================================================================
// SEARCH / DISPLAY
// =============================================================================

/// Preview length for search results, in characters.
pub const SEARCH_PREVIEW_CHARS: usize = 100;

/// Timestamp format for note info and listings.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// ENVIRONMENT VARIABLES
// =============================================================================

/// Overrides the default data directory.
pub const ENV_DATA_DIR: &str = "MEMO_DATA_DIR";

/// Overrides the directory holding per-user configuration.
pub const ENV_CONFIG_DIR: &str = "MEMO_CONFIG_DIR";

/// Password for encrypted profiles in non-interactive use.
pub const ENV_PASSWORD: &str = "MEMO_PASSWORD";
