//! Text-in, text-out encryption used for whole note files.
//!
//! `encrypt` returns base64 of the AES-256-CBC ciphertext of the UTF-8 text.
//! Nothing else is stored alongside it; the key and IV are re-derived from
//! the password on every call.

use crate::cipher::{aes_cbc_decrypt, aes_cbc_encrypt};
use crate::error::{CryptoError, CryptoResult};
use crate::format::{base64_decode, base64_encode};
use crate::kdf::{derive_key, KdfParams};

/// Encrypt UTF-8 text with a password, returning base64 ciphertext.
pub fn encrypt(plaintext: &str, password: &str) -> CryptoResult<String> {
    encrypt_with(plaintext, password, &KdfParams::default())
}

/// Decrypt base64 ciphertext with a password.
///
/// Fails on malformed base64, bad padding (wrong password or corrupted data)
/// and on output that is not valid UTF-8.
pub fn decrypt(ciphertext: &str, password: &str) -> CryptoResult<String> {
    decrypt_with(ciphertext, password, &KdfParams::default())
}

/// [`encrypt`] with explicit KDF parameters.
pub fn encrypt_with(plaintext: &str, password: &str, params: &KdfParams) -> CryptoResult<String> {
    let derived = derive_key(password.as_bytes(), params)?;
    let ciphertext = aes_cbc_encrypt(derived.key(), derived.iv(), plaintext.as_bytes())?;
    Ok(base64_encode(&ciphertext))
}

/// [`decrypt`] with explicit KDF parameters.
pub fn decrypt_with(ciphertext: &str, password: &str, params: &KdfParams) -> CryptoResult<String> {
    let bytes = base64_decode(ciphertext)?;
    let derived = derive_key(password.as_bytes(), params)?;
    let plaintext = aes_cbc_decrypt(derived.key(), derived.iv(), &bytes)?;

    String::from_utf8(plaintext)
        .map_err(|_| CryptoError::Decryption("plaintext is not valid UTF-8".to_string()))
}
