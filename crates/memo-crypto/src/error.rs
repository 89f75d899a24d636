//! Error types for cryptographic operations.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Ciphertext is not valid base64.
    #[error("Invalid ciphertext encoding: {0}")]
    Encoding(String),

    /// Key derivation failed.
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    /// Encryption failed.
    #[error("Encryption failed: {0}")]
    Encryption(String),

    /// Decryption failed - wrong password or corrupted data.
    #[error("Decryption failed: {0}")]
    Decryption(String),

    /// Password hashing or hash parsing failed.
    #[error("Password hash error: {0}")]
    PasswordHash(String),

    /// Password too short.
    #[error("Password too short (minimum {0} characters required)")]
    PasswordTooShort(usize),
}

/// Result type for cryptographic operations.
pub type CryptoResult<T> = Result<T, CryptoError>;
