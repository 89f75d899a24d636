//! # memo-crypto
//!
//! Password-based protection for StickyMemo note files.
//!
//! ## Primitives
//!
//! - **Key derivation**: PBKDF2-HMAC-SHA256, fixed application salt,
//!   10 000 iterations; 48 bytes split into key (32) and IV (16)
//! - **Cipher**: AES-256-CBC with PKCS#7 padding
//! - **Encoding**: standard base64 of the raw ciphertext
//! - **Password check**: Argon2id PHC hash, independent of the file key
//!
//! ## Examples
//!
//! ```rust
//! use memo_crypto::{decrypt, encrypt};
//!
//! let sealed = encrypt(r#"[{"content":"Buy milk"}]"#, "my-pass").unwrap();
//! assert_eq!(decrypt(&sealed, "my-pass").unwrap(), r#"[{"content":"Buy milk"}]"#);
//! assert!(decrypt(&sealed, "not-my-pass").is_err());
//! ```
//!
//! ```rust
//! use memo_crypto::{detect_format, encrypt, FileFormat};
//!
//! assert_eq!(detect_format("[]"), FileFormat::PlainJson);
//! assert_eq!(detect_format(&encrypt("[]", "pw").unwrap()), FileFormat::Encrypted);
//! ```

pub mod cipher;
pub mod detect;
pub mod envelope;
pub mod error;
pub mod format;
pub mod kdf;
pub mod password;

// Re-export commonly used types
pub use detect::{detect_format, is_encrypted};
pub use envelope::{decrypt, encrypt};
pub use error::{CryptoError, CryptoResult};
pub use format::{base64_decode, base64_encode, FileFormat};
pub use kdf::{derive_key, DerivedKey, KdfParams};
pub use password::{hash_password, validate_password, verify_password, MIN_PASSWORD_LENGTH};
