//! AES-256-CBC cipher operations with PKCS#7 padding.

use aes::Aes256;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use crate::error::{CryptoError, CryptoResult};
use crate::kdf::{IV_LEN, KEY_LEN};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// AES block size in bytes.
pub const BLOCK_LEN: usize = 16;

/// Encrypt plaintext with AES-256-CBC.
///
/// Output length is the plaintext length rounded up to the next full block
/// (a full padding block is added when already aligned).
pub fn aes_cbc_encrypt(
    key: &[u8; KEY_LEN],
    iv: &[u8; IV_LEN],
    plaintext: &[u8],
) -> CryptoResult<Vec<u8>> {
    let cipher = Aes256CbcEnc::new_from_slices(key, iv)
        .map_err(|e| CryptoError::Encryption(e.to_string()))?;

    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

/// Decrypt AES-256-CBC ciphertext and strip the padding.
///
/// A wrong key almost always shows up here as invalid padding.
pub fn aes_cbc_decrypt(
    key: &[u8; KEY_LEN],
    iv: &[u8; IV_LEN],
    ciphertext: &[u8],
) -> CryptoResult<Vec<u8>> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
        return Err(CryptoError::Decryption(format!(
            "ciphertext length {} is not a positive multiple of {}",
            ciphertext.len(),
            BLOCK_LEN
        )));
    }

    let cipher = Aes256CbcDec::new_from_slices(key, iv)
        .map_err(|_| CryptoError::Decryption("Invalid key".to_string()))?;

    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CryptoError::Decryption("AES-CBC padding check failed".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let key = [42u8; 32];
        let iv = [1u8; 16];
        let plaintext = b"Hello, World!";

        let ciphertext = aes_cbc_encrypt(&key, &iv, plaintext).unwrap();
        let decrypted = aes_cbc_decrypt(&key, &iv, &ciphertext).unwrap();

        assert_eq!(plaintext.as_slice(), decrypted.as_slice());
    }

    #[test]
    fn test_ciphertext_is_block_padded() {
        let key = [42u8; 32];
        let iv = [1u8; 16];

        assert_eq!(aes_cbc_encrypt(&key, &iv, b"Hello, World!").unwrap().len(), 16);
        // Aligned input gets a whole padding block
        assert_eq!(aes_cbc_encrypt(&key, &iv, &[0u8; 16]).unwrap().len(), 32);
    }

    #[test]
    fn test_encrypt_empty_plaintext() {
        let key = [42u8; 32];
        let iv = [1u8; 16];

        let ciphertext = aes_cbc_encrypt(&key, &iv, b"").unwrap();
        assert_eq!(ciphertext.len(), 16);

        let decrypted = aes_cbc_decrypt(&key, &iv, &ciphertext).unwrap();
        assert!(decrypted.is_empty());
    }

    #[test]
    fn test_decrypt_truncated_ciphertext() {
        let key = [42u8; 32];
        let iv = [1u8; 16];

        let ciphertext = aes_cbc_encrypt(&key, &iv, b"Secret data here").unwrap();
        let result = aes_cbc_decrypt(&key, &iv, &ciphertext[..ciphertext.len() - 3]);

        assert!(matches!(result, Err(CryptoError::Decryption(_))));
    }

    #[test]
    fn test_decrypt_empty_ciphertext() {
        let result = aes_cbc_decrypt(&[42u8; 32], &[1u8; 16], &[]);
        assert!(matches!(result, Err(CryptoError::Decryption(_))));
    }

    #[test]
    fn test_different_ivs_different_ciphertext() {
        let key = [42u8; 32];
        let plaintext = b"Same message";

        let ciphertext1 = aes_cbc_encrypt(&key, &[1u8; 16], plaintext).unwrap();
        let ciphertext2 = aes_cbc_encrypt(&key, &[2u8; 16], plaintext).unwrap();

        assert_ne!(ciphertext1, ciphertext2);
    }

    #[test]
    fn test_encrypt_large_plaintext() {
        let key = [42u8; 32];
        let iv = [1u8; 16];
        let plaintext = vec![7u8; 1024 * 1024];

        let ciphertext = aes_cbc_encrypt(&key, &iv, &plaintext).unwrap();
        let decrypted = aes_cbc_decrypt(&key, &iv, &ciphertext).unwrap();

        assert_eq!(plaintext, decrypted);
    }
}
