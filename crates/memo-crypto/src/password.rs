//! Argon2id password hashing, verification, and strength validation.
//!
//! The stored hash only answers "is this the right password"; it is never
//! used to derive file keys. Hashes are PHC strings, so parameters and salt
//! travel with the hash through backups.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::{CryptoError, CryptoResult};

/// Minimum password length accepted when enabling encryption.
pub const MIN_PASSWORD_LENGTH: usize = 4;

/// Hash a password using Argon2id with a random salt.
pub fn hash_password(password: &str) -> CryptoResult<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| CryptoError::PasswordHash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC hash.
///
/// Returns `Ok(false)` on mismatch and `Err` only when the stored hash
/// cannot be parsed.
pub fn verify_password(password: &str, hash: &str) -> CryptoResult<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| CryptoError::PasswordHash(e.to_string()))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(CryptoError::PasswordHash(e.to_string())),
    }
}

/// Validate password strength (character count, not bytes).
pub fn validate_password(password: &str) -> CryptoResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CryptoError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("open sesame").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("open sesame", &hash).unwrap());
    }

    #[test]
    fn test_wrong_password_fails() {
        let hash = hash_password("real-password").unwrap();
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_garbage_hash_errors() {
        let result = verify_password("pw", "not-a-phc-string");
        assert!(matches!(result, Err(CryptoError::PasswordHash(_))));
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("abcd").is_ok());
        assert!(validate_password("한글암호").is_ok());
        assert!(matches!(
            validate_password("abc"),
            Err(CryptoError::PasswordTooShort(4))
        ));
        assert!(validate_password("").is_err());
    }
}
