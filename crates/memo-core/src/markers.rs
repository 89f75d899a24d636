//! Inline image markers (`[IMG<n>]`) embedded in note content.
//!
//! A marker refers to a slot of the note's image list by index. Markers whose
//! slot is missing or empty are dangling and stay in the text as-is.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches `[IMG<digits>]`.
static MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[IMG(\d+)\]").expect("marker regex is valid"));

/// Render the marker text for an image index.
pub fn marker(index: usize) -> String {
    format!("[IMG{}]", index)
}

/// True when `content` contains at least one marker, dangling or not.
pub fn has_markers(content: &str) -> bool {
    MARKER_RE.is_match(content)
}

/// Remove every occurrence of the marker for `index` from `content`.
pub fn strip_marker(content: &str, index: usize) -> String {
    content.replace(&marker(index), "")
}

/// A piece of note content as a renderer sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSegment<'a> {
    /// Literal text, including dangling markers.
    Text(&'a str),
    /// A live image; `data` is the base64 blob from the image list.
    Image { index: usize, data: &'a str },
}

/// Split `content` into text and image segments.
///
/// Adjacent text (including dangling markers) is merged into one segment.
pub fn segments<'a>(content: &'a str, images: &'a [String]) -> Vec<ContentSegment<'a>> {
    let mut out = Vec::new();
    let mut text_start = 0;

    for caps in MARKER_RE.captures_iter(content) {
        let (Some(whole), Some(digits)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let live = digits
            .as_str()
            .parse::<usize>()
            .ok()
            .and_then(|i| images.get(i).filter(|d| !d.is_empty()).map(|d| (i, d)));

        if let Some((index, data)) = live {
            if whole.start() > text_start {
                out.push(ContentSegment::Text(&content[text_start..whole.start()]));
            }
            out.push(ContentSegment::Image {
                index,
                data: data.as_str(),
            });
            text_start = whole.end();
        }
    }

    if text_start < content.len() {
        out.push(ContentSegment::Text(&content[text_start..]));
    }
    out
}
