//! Built-in note color themes.

use crate::defaults::{NOTE_TEXT_COLOR, NOTE_TEXT_COLOR_LIGHT};

/// A named background color with its text color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteTheme {
    /// Stable identifier, also used on the command line.
    pub key: &'static str,
    pub name: &'static str,
    pub background: &'static str,
    pub foreground: &'static str,
}

/// Themes offered for new and existing notes, in menu order.
pub const THEMES: &[NoteTheme] = &[
    NoteTheme {
        key: "yellow",
        name: "Classic Yellow",
        background: "#FFFF99",
        foreground: NOTE_TEXT_COLOR,
    },
    NoteTheme {
        key: "pink",
        name: "Pastel Pink",
        background: "#FFB3D9",
        foreground: NOTE_TEXT_COLOR,
    },
    NoteTheme {
        key: "mint",
        name: "Mint Green",
        background: "#B3FFB3",
        foreground: NOTE_TEXT_COLOR,
    },
    NoteTheme {
        key: "sky",
        name: "Sky Blue",
        background: "#B3E5FF",
        foreground: NOTE_TEXT_COLOR,
    },
    NoteTheme {
        key: "lavender",
        name: "Lavender",
        background: "#E6B3FF",
        foreground: NOTE_TEXT_COLOR,
    },
    NoteTheme {
        key: "peach",
        name: "Peach",
        background: "#FFD9B3",
        foreground: NOTE_TEXT_COLOR,
    },
    NoteTheme {
        key: "darkgray",
        name: "Dark Gray",
        background: "#4A4A4A",
        foreground: NOTE_TEXT_COLOR_LIGHT,
    },
    NoteTheme {
        key: "navy",
        name: "Navy Blue",
        background: "#2C3E50",
        foreground: NOTE_TEXT_COLOR_LIGHT,
    },
];

/// Backgrounds that get light text.
const DARK_BACKGROUNDS: &[&str] = &["#4A4A4A", "#2C3E50"];

/// Text color for a note background. Comparison ignores case.
pub fn foreground_for(background: &str) -> &'static str {
    let bg = background.trim();
    if DARK_BACKGROUNDS.iter().any(|d| d.eq_ignore_ascii_case(bg)) {
        NOTE_TEXT_COLOR_LIGHT
    } else {
        NOTE_TEXT_COLOR
    }
}

/// Look up a theme by key or display name (case-insensitive).
pub fn find_theme(name: &str) -> Option<&'static NoteTheme> {
    let name = name.trim();
    THEMES
        .iter()
        .find(|t| t.key.eq_ignore_ascii_case(name) || t.name.eq_ignore_ascii_case(name))
}
