//! Case-insensitive search over a user's notes.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::defaults::{SEARCH_PREVIEW_CHARS, TITLE_ELLIPSIS, UNTITLED_NOTE};
use crate::models::Note;

/// One matching note.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteSearchHit {
    pub id: String,
    pub title: String,
    pub preview: String,
    pub modified_at: DateTime<Utc>,
}

/// Title shown in lists: the note title, or a placeholder when empty.
pub fn display_title(note: &Note) -> String {
    let title = note.title();
    if title.is_empty() {
        UNTITLED_NOTE.to_string()
    } else {
        title
    }
}

/// Single-line preview of `content`, at most [`SEARCH_PREVIEW_CHARS`]
/// characters before the ellipsis.
pub fn preview(content: &str) -> String {
    let flat = content.replace('\r', "").replace('\n', " ");
    if flat.chars().count() > SEARCH_PREVIEW_CHARS {
        let head: String = flat.chars().take(SEARCH_PREVIEW_CHARS).collect();
        format!("{}{}", head, TITLE_ELLIPSIS)
    } else {
        flat
    }
}

/// Notes whose display title or content contains `query`, ignoring case.
///
/// A blank query matches every note. Input order is preserved.
pub fn search_notes(notes: &[Note], query: &str) -> Vec<NoteSearchHit> {
    let needle = query.trim().to_lowercase();

    notes
        .iter()
        .filter_map(|note| {
            let title = display_title(note);
            let matched = needle.is_empty()
                || title.to_lowercase().contains(&needle)
                || note.content().to_lowercase().contains(&needle);
            matched.then(|| NoteSearchHit {
                id: note.id().to_string(),
                title,
                preview: preview(note.content()),
                modified_at: note.modified_at(),
            })
        })
        .collect()
}
