//! Shared format utilities.

use base64::Engine;

use crate::error::{CryptoError, CryptoResult};

/// Stored note-file content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Plain JSON text (array or object).
    PlainJson,
    /// Base64 ciphertext produced by [`crate::encrypt`].
    Encrypted,
    /// Neither; empty or garbage.
    Unknown,
}

/// Encode bytes as base64.
pub fn base64_encode(data: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(data)
}

/// Decode a base64 string to bytes, ignoring surrounding whitespace.
pub fn base64_decode(data: &str) -> CryptoResult<Vec<u8>> {
    base64::engine::general_purpose::STANDARD
        .decode(data.trim())
        .map_err(|e| CryptoError::Encoding(format!("Invalid base64: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_roundtrip() {
        let original = [42u8; 32];
        let encoded = base64_encode(&original);
        let decoded = base64_decode(&encoded).unwrap();
        assert_eq!(original.as_slice(), decoded.as_slice());
    }

    #[test]
    fn test_base64_decode_trims_whitespace() {
        let encoded = format!("  {}\n", base64_encode(b"abc"));
        assert_eq!(base64_decode(&encoded).unwrap(), b"abc");
    }

    #[test]
    fn test_base64_decode_invalid() {
        let result = base64_decode("not valid base64!!!");
        assert!(matches!(result, Err(CryptoError::Encoding(_))));
    }

    #[test]
    fn test_file_format_debug() {
        assert_eq!(format!("{:?}", FileFormat::Encrypted), "Encrypted");
        assert_eq!(format!("{:?}", FileFormat::PlainJson), "PlainJson");
    }
}
