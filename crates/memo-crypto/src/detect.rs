//! Format detection for stored note files.
//!
//! Distinguishes plain JSON from base64 ciphertext without a password, so the
//! store can tell a freshly imported (still plaintext) file from an encrypted
//! one.

use crate::cipher::BLOCK_LEN;
use crate::format::{base64_decode, FileFormat};

/// Detect the format of note-file text.
///
/// Plain JSON starts with `[` or `{` (after whitespace and an optional BOM).
/// Ciphertext is valid base64 decoding to a whole number of AES blocks.
pub fn detect_format(text: &str) -> FileFormat {
    let trimmed = text.trim_start_matches('\u{feff}').trim();

    if trimmed.is_empty() {
        return FileFormat::Unknown;
    }

    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        return FileFormat::PlainJson;
    }

    match base64_decode(trimmed) {
        Ok(bytes) if !bytes.is_empty() && bytes.len() % BLOCK_LEN == 0 => FileFormat::Encrypted,
        _ => FileFormat::Unknown,
    }
}

/// Check if note-file text looks encrypted.
pub fn is_encrypted(text: &str) -> bool {
    matches!(detect_format(text), FileFormat::Encrypted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::encrypt;

    #[test]
    fn test_detect_encrypted() {
        let encrypted = encrypt(r#"[{"id":"1"}]"#, "pass1234").unwrap();

        assert_eq!(detect_format(&encrypted), FileFormat::Encrypted);
        assert!(is_encrypted(&encrypted));
    }

    #[test]
    fn test_detect_plain_array() {
        let data = "[\n  {\"id\": \"a\"}\n]";
        assert_eq!(detect_format(data), FileFormat::PlainJson);
        assert!(!is_encrypted(data));
    }

    #[test]
    fn test_detect_plain_with_bom() {
        assert_eq!(detect_format("\u{feff}[]"), FileFormat::PlainJson);
    }

    #[test]
    fn test_detect_empty() {
        assert_eq!(detect_format(""), FileFormat::Unknown);
        assert_eq!(detect_format("   \n"), FileFormat::Unknown);
    }

    #[test]
    fn test_detect_garbage() {
        assert_eq!(detect_format("hello world"), FileFormat::Unknown);
    }

    #[test]
    fn test_detect_base64_wrong_block_size() {
        // "abc" is valid base64 of 3 bytes, not a cipher block multiple
        assert_eq!(detect_format("YWJj"), FileFormat::Unknown);
    }
}
