//! File and key naming for per-user data.

use crate::defaults::{NOTES_FILE_NAME, NOTES_FILE_PREFIX};

/// Make a username safe to embed in a file name.
///
/// Path separators, reserved characters and control characters become `_`.
pub fn sanitize_username(username: &str) -> String {
    username
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '<' | '>' | ':' | '"' | '|' | '?' | '*' | '\0' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// True when `username` is non-empty and survives [`sanitize_username`]
/// unchanged. New profiles must pass this so no two of them share a note
/// file.
pub fn is_file_safe_username(username: &str) -> bool {
    !username.is_empty() && sanitize_username(username) == username
}

/// Note file name for a user: `notes.json` for the no-name user,
/// `notes_<user>.json` otherwise.
pub fn notes_file_name(username: &str) -> String {
    let safe = sanitize_username(username);
    if safe.is_empty() {
        NOTES_FILE_NAME.to_string()
    } else {
        format!("{}{}.json", NOTES_FILE_PREFIX, safe)
    }
}

/// Preference key holding the current-user pointer.
pub const CURRENT_USER_KEY: &str = "current_user";

/// Preference key for a per-user value: `user.<name>.<field>`.
pub fn user_key(username: &str, field: &str) -> String {
    format!("user.{}.{}", username, field)
}

/// Per-user fields kept in the preference store.
pub mod fields {
    pub const DATA_PATH: &str = "data_path";
    pub const PASSWORD_HASH: &str = "password_hash";
    pub const PASSWORD_HINT: &str = "password_hint";
    pub const ENCRYPTION_ENABLED: &str = "encryption_enabled";

    /// Every per-user field, for clearing a profile.
    pub const ALL: &[&str] = &[DATA_PATH, PASSWORD_HASH, PASSWORD_HINT, ENCRYPTION_ENABLED];
}
