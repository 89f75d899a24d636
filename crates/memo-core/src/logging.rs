//! Structured logging field name constants for StickyMemo.
//!
//! `tracing` macros take field names as literals, so call sites spell these
//! keys out; this module is the list they are drawn from. Log lines can then
//! be filtered by the same keys regardless of which component emitted them.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Data could not be persisted or restored and the user must know |
//! | WARN  | Recoverable issue, fail-soft default returned |
//! | INFO  | Lifecycle events (session open, user switch, import/export done) |
//! | DEBUG | Decision points (path resolution, format detection) |
//! | TRACE | Per-note iteration |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "store", "users", "settings", "backup", "session", "cli"
pub const SUBSYSTEM: &str = "subsystem";

/// Logical operation name.
/// Examples: "load", "save", "resolve_path", "import", "export"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Profile name the operation is scoped to.
pub const USERNAME: &str = "username";

/// Filesystem path involved.
pub const PATH: &str = "path";

/// Configured data and configuration roots, logged at startup.
pub const DATA_DIR: &str = "data_dir";
pub const CONFIG_DIR: &str = "config_dir";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Number of notes loaded, saved or exported.
pub const NOTE_COUNT: &str = "note_count";

/// Byte length of a file payload.
pub const BYTES: &str = "bytes";

// ─── State fields ──────────────────────────────────────────────────────────

/// Whether encryption is enabled for the user.
pub const ENCRYPTED: &str = "encrypted";

/// Detected on-disk format of a note file.
pub const FILE_FORMAT: &str = "file_format";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
