//! Error types for StickyMemo.

use thiserror::Error;

/// Result type alias using StickyMemo's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for persistence operations.
///
/// These never cross the GUI boundary directly; the session layer turns them
/// into safe defaults. Only the backup flow reports its own error type.
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Encryption or decryption failed
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Encryption is enabled but no password was supplied
    #[error("Password required")]
    PasswordRequired,

    /// Supplied password does not match the stored hash
    #[error("Wrong password")]
    WrongPassword,

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Per-user configuration could not be read or written
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<memo_crypto::CryptoError> for Error {
    fn from(e: memo_crypto::CryptoError) -> Self {
        match e {
            memo_crypto::CryptoError::PasswordTooShort(_) => Error::InvalidInput(e.to_string()),
            other => Error::Crypto(other.to_string()),
        }
    }
}
