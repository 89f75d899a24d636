//! Key derivation using PBKDF2-HMAC-SHA256.
//!
//! Note files are encrypted with a key and IV that both come from the
//! password and a salt shared by every installation. Two files encrypted with
//! the same password therefore use the same key material. This matches the
//! on-disk format already in the field and is only meant to keep a local file
//! away from casual readers.

use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CryptoError, CryptoResult};

/// Application-wide salt for note-file key derivation.
pub const NOTE_FILE_SALT: &[u8] = b"JISMemoSalt2025";

/// PBKDF2 iteration count for note files.
pub const NOTE_FILE_ITERATIONS: u32 = 10_000;

/// AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;

/// AES block / CBC IV length in bytes.
pub const IV_LEN: usize = 16;

/// PBKDF2 parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KdfParams {
    /// Salt bytes.
    pub salt: Vec<u8>,
    /// Iteration count.
    pub iterations: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            salt: NOTE_FILE_SALT.to_vec(),
            iterations: NOTE_FILE_ITERATIONS,
        }
    }
}

/// Key and IV pair with automatic zeroization on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LEN],
    iv: [u8; IV_LEN],
}

impl DerivedKey {
    /// Create a derived key from raw parts.
    pub fn from_parts(key: [u8; KEY_LEN], iv: [u8; IV_LEN]) -> Self {
        Self { key, iv }
    }

    /// Get the key bytes.
    pub fn key(&self) -> &[u8; KEY_LEN] {
        &self.key
    }

    /// Get the IV bytes.
    pub fn iv(&self) -> &[u8; IV_LEN] {
        &self.iv
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .field("iv", &"[REDACTED]")
            .finish()
    }
}

/// Derive an AES-256 key and CBC IV from a password.
///
/// The first 32 bytes of the PBKDF2 stream are the key and the next 16 are
/// the IV.
pub fn derive_key(password: &[u8], params: &KdfParams) -> CryptoResult<DerivedKey> {
    if params.iterations == 0 {
        return Err(CryptoError::KeyDerivation(
            "iteration count must be non-zero".into(),
        ));
    }

    let mut stream = [0u8; KEY_LEN + IV_LEN];
    pbkdf2::pbkdf2_hmac::<Sha256>(password, &params.salt, params.iterations, &mut stream);

    let mut key = [0u8; KEY_LEN];
    let mut iv = [0u8; IV_LEN];
    key.copy_from_slice(&stream[..KEY_LEN]);
    iv.copy_from_slice(&stream[KEY_LEN..]);
    stream.zeroize();

    Ok(DerivedKey { key, iv })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kdf_params_default() {
        let params = KdfParams::default();
        assert_eq!(params.salt, NOTE_FILE_SALT);
        assert_eq!(params.iterations, 10_000);
    }

    #[test]
    fn test_derive_key_deterministic() {
        let params = KdfParams::default();

        let key1 = derive_key(b"hunter22", &params).unwrap();
        let key2 = derive_key(b"hunter22", &params).unwrap();

        assert_eq!(key1.key(), key2.key());
        assert_eq!(key1.iv(), key2.iv());
    }

    #[test]
    fn test_derive_key_different_passwords() {
        let params = KdfParams::default();

        let key1 = derive_key(b"first-password", &params).unwrap();
        let key2 = derive_key(b"second-password", &params).unwrap();

        assert_ne!(key1.key(), key2.key());
        assert_ne!(key1.iv(), key2.iv());
    }

    #[test]
    fn test_derive_key_different_salts() {
        let params1 = KdfParams {
            salt: vec![1u8; 16],
            iterations: 1000,
        };
        let params2 = KdfParams {
            salt: vec![2u8; 16],
            iterations: 1000,
        };

        let key1 = derive_key(b"same-password", &params1).unwrap();
        let key2 = derive_key(b"same-password", &params2).unwrap();

        assert_ne!(key1.key(), key2.key());
    }

    #[test]
    fn test_key_and_iv_are_distinct_stream_parts() {
        let key = derive_key(b"password", &KdfParams::default()).unwrap();
        assert_ne!(&key.key()[..IV_LEN], key.iv());
    }

    #[test]
    fn test_derive_key_empty_password_allowed() {
        assert!(derive_key(b"", &KdfParams::default()).is_ok());
    }

    #[test]
    fn test_derive_key_zero_iterations_rejected() {
        let params = KdfParams {
            salt: NOTE_FILE_SALT.to_vec(),
            iterations: 0,
        };
        let result = derive_key(b"password", &params);
        assert!(matches!(result, Err(CryptoError::KeyDerivation(_))));
    }

    #[test]
    fn test_derived_key_debug_redacted() {
        let key = DerivedKey::from_parts([7u8; KEY_LEN], [9u8; IV_LEN]);
        let debug_str = format!("{:?}", key);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains('7'));
    }

    #[test]
    fn test_kdf_params_serialization() {
        let params = KdfParams::default();
        let json = serde_json::to_string(&params).unwrap();
        let parsed: KdfParams = serde_json::from_str(&json).unwrap();
        assert_eq!(params, parsed);
    }
}
