//! Core data models for StickyMemo.
//!
//! These types are shared across all StickyMemo crates and are the exact
//! shapes written to disk.

use chrono::{DateTime, Duration, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::defaults::{
    BACKGROUND_COLOR, DEFAULT_USER, FONT_SIZE_DEFAULT, FONT_SIZE_MAX, FONT_SIZE_MIN, LANGUAGE,
    NOTE_COLOR, NOTE_HEIGHT, NOTE_TEXT_COLOR, NOTE_WIDTH, TIMESTAMP_FORMAT, TITLE_ELLIPSIS,
    TITLE_MAX_CHARS,
};
use crate::markers;
use crate::theme;

// =============================================================================
// NOTE
// =============================================================================

/// Clamp a font size into the allowed range. Non-finite values become the default.
pub fn clamp_font_size(size: f64) -> f64 {
    if size.is_finite() {
        size.clamp(FONT_SIZE_MIN, FONT_SIZE_MAX)
    } else {
        FONT_SIZE_DEFAULT
    }
}

/// Derive a title from the first line of `content`.
pub fn derive_title(content: &str) -> String {
    let first = content.lines().next().unwrap_or("").trim();
    if first.chars().count() > TITLE_MAX_CHARS {
        let head: String = first.chars().take(TITLE_MAX_CHARS).collect();
        format!("{}{}", head, TITLE_ELLIPSIS)
    } else {
        first.to_string()
    }
}

/// Where and by whom a note was created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Provenance {
    pub owner: String,
    pub device_type: String,
    pub device_name: String,
}

impl Provenance {
    /// Provenance for the running machine.
    pub fn detect(owner: impl Into<String>) -> Self {
        let device_name = std::env::var("COMPUTERNAME")
            .or_else(|_| std::env::var("HOSTNAME"))
            .unwrap_or_else(|_| "unknown".to_string());
        Self {
            owner: owner.into(),
            device_type: std::env::consts::OS.to_string(),
            device_name,
        }
    }
}

/// A single sticky note.
///
/// Fields are private so the font-size range and the `modified_at` rules
/// cannot be bypassed. Reading goes through [`StoredNote`], which folds the
/// legacy single-image field into the image list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredNote")]
pub struct Note {
    id: String,
    title: String,
    content: String,
    image_data_list: Vec<String>,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    color: String,
    font_size: f64,
    owner: String,
    device_type: String,
    device_name: String,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

impl Note {
    /// Create an empty note with default geometry, color and font size.
    pub fn new(provenance: Provenance) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: String::new(),
            content: String::new(),
            image_data_list: Vec::new(),
            left: 0.0,
            top: 0.0,
            width: NOTE_WIDTH,
            height: NOTE_HEIGHT,
            color: NOTE_COLOR.to_string(),
            font_size: FONT_SIZE_DEFAULT,
            owner: provenance.owner,
            device_type: provenance.device_type,
            device_name: provenance.device_name,
            created_at: now,
            modified_at: now,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.set_content(content);
        self
    }

    pub fn with_position(mut self, left: f64, top: f64) -> Self {
        self.set_position(left, top);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.set_font_size(size);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The explicit title if set, otherwise the first content line
    /// (truncated). Empty when both are empty.
    pub fn title(&self) -> String {
        if self.title.trim().is_empty() {
            derive_title(&self.content)
        } else {
            self.title.clone()
        }
    }

    /// The explicit title only; empty when the title is derived.
    pub fn explicit_title(&self) -> &str {
        &self.title
    }

    /// Set or clear (with an empty string) the explicit title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace the content. `modified_at` moves only if the text differs.
    pub fn set_content(&mut self, content: impl Into<String>) {
        let content = content.into();
        if content != self.content {
            self.content = content;
            self.touch();
        }
    }

    pub fn images(&self) -> &[String] {
        &self.image_data_list
    }

    /// First non-empty image, for callers that only know one image per note.
    pub fn primary_image(&self) -> Option<&str> {
        self.image_data_list
            .iter()
            .find(|d| !d.is_empty())
            .map(String::as_str)
    }

    /// Append an image and insert its marker at character offset `at`
    /// (clamped to the content length). Returns the new image index.
    pub fn insert_image(&mut self, data: impl Into<String>, at: usize) -> usize {
        let index = self.image_data_list.len();
        self.image_data_list.push(data.into());

        let byte_pos = self
            .content
            .char_indices()
            .nth(at)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len());
        let mut content = self.content.clone();
        content.insert_str(byte_pos, &markers::marker(index));
        self.set_content(content);
        index
    }

    /// Remove image `index`: strip its markers from the content and empty
    /// its slot so later indices stay valid. Returns false if there was no
    /// live image at that index.
    pub fn remove_image(&mut self, index: usize) -> bool {
        match self.image_data_list.get_mut(index) {
            Some(slot) if !slot.is_empty() => slot.clear(),
            _ => return false,
        }
        let stripped = markers::strip_marker(&self.content, index);
        self.set_content(stripped);
        true
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    /// Move the note. Does not touch `modified_at`.
    pub fn set_position(&mut self, left: f64, top: f64) {
        self.left = left;
        self.top = top;
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Resize the note. Does not touch `modified_at`.
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }

    /// Text color derived from the background.
    pub fn foreground_color(&self) -> &'static str {
        theme::foreground_for(&self.color)
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    pub fn set_font_size(&mut self, size: f64) {
        self.font_size = clamp_font_size(size);
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn device_type(&self) -> &str {
        &self.device_type
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }

    /// Label/value pairs for a note information panel.
    pub fn info_lines(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Owner", self.owner.clone()),
            ("Device type", self.device_type.clone()),
            ("Device name", self.device_name.clone()),
            ("Created", format_timestamp(self.created_at)),
            ("Modified", format_timestamp(self.modified_at)),
        ]
    }

    // Strictly later than the previous value even if the clock has not moved.
    fn touch(&mut self) {
        let now = Utc::now();
        self.modified_at = if now > self.modified_at {
            now
        } else {
            self.modified_at + Duration::microseconds(1)
        };
    }
}

/// Format a timestamp in local time for display.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string()
}

/// On-disk note shape, lenient about missing and legacy fields.
///
/// PascalCase aliases accept files written by older builds.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredNote {
    #[serde(default, alias = "Id")]
    id: String,
    #[serde(default, alias = "Title")]
    title: String,
    #[serde(default, alias = "Content")]
    content: String,
    #[serde(default, alias = "ImageDataList")]
    image_data_list: Vec<String>,
    #[serde(default, alias = "ImageData")]
    image_data: Option<String>,
    #[serde(default, alias = "Left")]
    left: f64,
    #[serde(default, alias = "Top")]
    top: f64,
    #[serde(default = "default_width", alias = "Width")]
    width: f64,
    #[serde(default = "default_height", alias = "Height")]
    height: f64,
    #[serde(default = "default_color", alias = "Color")]
    color: String,
    #[serde(default = "default_font_size", alias = "FontSize")]
    font_size: f64,
    #[serde(default, alias = "Owner")]
    owner: String,
    #[serde(default, alias = "DeviceType")]
    device_type: String,
    #[serde(default, alias = "DeviceName")]
    device_name: String,
    #[serde(default, alias = "CreatedAt")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "ModifiedAt")]
    modified_at: Option<DateTime<Utc>>,
}

fn default_width() -> f64 {
    NOTE_WIDTH
}

fn default_height() -> f64 {
    NOTE_HEIGHT
}

fn default_color() -> String {
    NOTE_COLOR.to_string()
}

fn default_font_size() -> f64 {
    FONT_SIZE_DEFAULT
}

impl From<StoredNote> for Note {
    fn from(s: StoredNote) -> Self {
        let mut images = s.image_data_list;
        let mut content = s.content;

        if images.is_empty() {
            if let Some(legacy) = s.image_data.filter(|d| !d.is_empty()) {
                images.push(legacy);
                if !markers::has_markers(&content) {
                    content.push_str(&markers::marker(0));
                }
            }
        }

        let id = if s.id.trim().is_empty() {
            Uuid::new_v4().to_string()
        } else {
            s.id
        };
        let created_at = s.created_at.or(s.modified_at).unwrap_or_else(Utc::now);
        let modified_at = s.modified_at.unwrap_or(created_at).max(created_at);

        Self {
            id,
            title: s.title,
            content,
            image_data_list: images,
            left: s.left,
            top: s.top,
            width: s.width,
            height: s.height,
            color: s.color,
            font_size: clamp_font_size(s.font_size),
            owner: s.owner,
            device_type: s.device_type,
            device_name: s.device_name,
            created_at,
            modified_at,
        }
    }
}

// =============================================================================
// USERS / SETTINGS / BACKUP
// =============================================================================

/// Entry of `users.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(alias = "Username")]
    pub username: String,
}

impl UserProfile {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    pub fn is_default(&self) -> bool {
        self.username == DEFAULT_USER
    }
}

/// Global application settings (`settings.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    #[serde(alias = "BackgroundColor")]
    pub background_color: String,
    #[serde(alias = "DefaultNoteColor")]
    pub default_note_color: String,
    #[serde(alias = "DefaultNoteTextColor")]
    pub default_note_text_color: String,
    #[serde(alias = "Language")]
    pub language: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            background_color: BACKGROUND_COLOR.to_string(),
            default_note_color: NOTE_COLOR.to_string(),
            default_note_text_color: NOTE_TEXT_COLOR.to_string(),
            language: LANGUAGE.to_string(),
        }
    }
}

/// Portable backup of one profile (`*.jmb`).
///
/// Carries the password hash and hint, never the password itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupRecord {
    #[serde(default, alias = "Username")]
    pub username: String,
    #[serde(alias = "Notes")]
    pub notes: Vec<Note>,
    #[serde(default, alias = "PasswordHash")]
    pub password_hash: Option<String>,
    #[serde(default, alias = "PasswordHint")]
    pub password_hint: Option<String>,
    #[serde(default, alias = "EncryptionEnabled")]
    pub encryption_enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note() -> Note {
        Note::new(Provenance {
            owner: "Default".into(),
            device_type: "linux".into(),
            device_name: "desk".into(),
        })
    }

    #[test]
    fn test_new_note_defaults() {
        let n = note();
        assert!(!n.id().is_empty());
        assert_eq!(n.width(), 250.0);
        assert_eq!(n.height(), 200.0);
        assert_eq!(n.color(), "#FFFF99");
        assert_eq!(n.font_size(), 14.0);
        assert_eq!(n.created_at(), n.modified_at());
        assert_eq!(n.title(), "");
    }

    #[test]
    fn test_title_derived_from_first_line() {
        let n = note().with_content("Buy milk\nand eggs");
        assert_eq!(n.title(), "Buy milk");
    }

    #[test]
    fn test_title_truncated_to_twenty_chars() {
        let n = note().with_content("Buy milk and eggs and bread");
        assert_eq!(n.title(), "Buy milk and eggs an...");
    }

    #[test]
    fn test_title_truncation_counts_chars() {
        let n = note().with_content("가나다라마바사아자차카타파하가나다라마바사");
        assert_eq!(n.title().chars().count(), 23);
    }

    #[test]
    fn test_explicit_title_wins() {
        let mut n = note().with_content("Buy milk");
        n.set_title("Groceries");
        assert_eq!(n.title(), "Groceries");
        n.set_title("");
        assert_eq!(n.title(), "Buy milk");
    }

    #[test]
    fn test_font_size_clamped() {
        let mut n = note();
        n.set_font_size(2.0);
        assert_eq!(n.font_size(), 8.0);
        n.set_font_size(100.0);
        assert_eq!(n.font_size(), 48.0);
        n.set_font_size(f64::NAN);
        assert_eq!(n.font_size(), 14.0);
        n.set_font_size(20.0);
        assert_eq!(n.font_size(), 20.0);
    }

    #[test]
    fn test_content_change_bumps_modified() {
        let mut n = note();
        let before = n.modified_at();
        n.set_content("hello");
        assert!(n.modified_at() > before);
        assert!(n.modified_at() >= n.created_at());
    }

    #[test]
    fn test_same_content_does_not_bump() {
        let mut n = note().with_content("hello");
        let before = n.modified_at();
        n.set_content("hello");
        assert_eq!(n.modified_at(), before);
    }

    #[test]
    fn test_move_and_resize_do_not_bump() {
        let mut n = note().with_content("hello");
        let before = n.modified_at();
        n.set_position(-40.0, 900.5);
        n.set_size(10.0, 10.0);
        n.set_color("#2C3E50");
        assert_eq!(n.modified_at(), before);
        assert_eq!(n.left(), -40.0);
    }

    #[test]
    fn test_repeated_edits_strictly_increase() {
        let mut n = note();
        let mut last = n.modified_at();
        for i in 0..50 {
            n.set_content(format!("v{}", i));
            assert!(n.modified_at() > last);
            last = n.modified_at();
        }
    }

    #[test]
    fn test_foreground_color() {
        let n = note().with_color("#2c3e50");
        assert_eq!(n.foreground_color(), "#FFFFFF");
        assert_eq!(note().foreground_color(), "#000000");
    }

    #[test]
    fn test_insert_image_appends_marker() {
        let mut n = note().with_content("ab");
        let before = n.modified_at();
        let i0 = n.insert_image("AAAA", 1);
        let i1 = n.insert_image("BBBB", 999);
        assert_eq!((i0, i1), (0, 1));
        assert_eq!(n.content(), "a[IMG0]b[IMG1]");
        assert!(n.modified_at() > before);
        assert_eq!(n.primary_image(), Some("AAAA"));
    }

    #[test]
    fn test_remove_image_keeps_indices() {
        let mut n = note();
        n.insert_image("AAAA", 0);
        n.insert_image("BBBB", 100);
        assert!(n.remove_image(0));
        assert_eq!(n.content(), "[IMG1]");
        assert_eq!(n.images(), &["".to_string(), "BBBB".to_string()]);
        assert_eq!(n.primary_image(), Some("BBBB"));

        assert!(!n.remove_image(0));
        assert!(!n.remove_image(7));
    }

    #[test]
    fn test_serialized_field_names_are_camel_case() {
        let json = serde_json::to_value(note().with_content("x")).unwrap();
        for key in [
            "id",
            "title",
            "content",
            "imageDataList",
            "left",
            "top",
            "width",
            "height",
            "color",
            "fontSize",
            "owner",
            "deviceType",
            "deviceName",
            "createdAt",
            "modifiedAt",
        ] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
        assert!(json.get("imageData").is_none());
    }

    #[test]
    fn test_roundtrip_preserves_note() {
        let mut n = note().with_content("hello").with_position(-5.0, 12.5);
        n.insert_image("QUJD", 0);
        let json = serde_json::to_string(&n).unwrap();
        let back: Note = serde_json::from_str(&json).unwrap();
        assert_eq!(back, n);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let n: Note = serde_json::from_str(r#"{"content":"only content"}"#).unwrap();
        assert!(!n.id().is_empty());
        assert_eq!(n.font_size(), 14.0);
        assert_eq!(n.width(), 250.0);
        assert_eq!(n.color(), "#FFFF99");
        assert!(n.modified_at() >= n.created_at());
    }

    #[test]
    fn test_font_size_clamped_on_read() {
        let n: Note = serde_json::from_str(r#"{"id":"a","fontSize":300}"#).unwrap();
        assert_eq!(n.font_size(), 48.0);
        let n: Note = serde_json::from_str(r#"{"id":"a","fontSize":1}"#).unwrap();
        assert_eq!(n.font_size(), 8.0);
    }

    #[test]
    fn test_legacy_image_data_folded() {
        let n: Note =
            serde_json::from_str(r#"{"Id":"x","Content":"pic","ImageData":"AAAA"}"#).unwrap();
        assert_eq!(n.id(), "x");
        assert_eq!(n.images(), &["AAAA".to_string()]);
        assert_eq!(n.content(), "pic[IMG0]");

        let out = serde_json::to_value(&n).unwrap();
        assert!(out.get("imageData").is_none());
    }

    #[test]
    fn test_legacy_image_ignored_when_list_present() {
        let n: Note = serde_json::from_str(
            r#"{"content":"[IMG0]","imageDataList":["NEW"],"imageData":"OLD"}"#,
        )
        .unwrap();
        assert_eq!(n.images(), &["NEW".to_string()]);
        assert_eq!(n.content(), "[IMG0]");
    }

    #[test]
    fn test_modified_before_created_is_repaired() {
        let n: Note = serde_json::from_str(
            r#"{"createdAt":"2025-01-02T00:00:00Z","modifiedAt":"2025-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(n.modified_at(), n.created_at());
    }

    #[test]
    fn test_info_lines() {
        let lines = note().info_lines();
        assert_eq!(lines[0], ("Owner", "Default".to_string()));
        assert_eq!(lines[3].0, "Created");
        assert_eq!(lines[3].1.len(), 19);
    }

    #[test]
    fn test_settings_defaults_and_partial() {
        let s: AppSettings = serde_json::from_str(r#"{"language":"ko"}"#).unwrap();
        assert_eq!(s.language, "ko");
        assert_eq!(s.background_color, "#F5F5F5");
        assert_eq!(s.default_note_color, "#FFFF99");
        assert_eq!(s.default_note_text_color, "#000000");
    }

    #[test]
    fn test_backup_record_requires_notes() {
        assert!(serde_json::from_str::<BackupRecord>(r#"{"username":"a"}"#).is_err());
        let r: BackupRecord = serde_json::from_str(r#"{"username":"a","notes":[]}"#).unwrap();
        assert!(!r.encryption_enabled);
        assert!(r.password_hash.is_none());
    }

    #[test]
    fn test_user_profile_accepts_pascal_case() {
        let users: Vec<UserProfile> =
            serde_json::from_str(r#"[{"Username":"Default"},{"username":"Alice"}]"#).unwrap();
        assert!(users[0].is_default());
        assert_eq!(users[1].username, "Alice");
    }
}
