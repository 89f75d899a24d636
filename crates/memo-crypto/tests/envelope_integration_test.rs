//! Integration tests for note-file encryption.
//!
//! This test suite validates:
//! - Round trips over a spread of passwords and payloads
//! - Wrong passwords are reported as errors, never as wrong plaintext
//! - Ciphertext is recognised by format detection
//! - Password hashes are independent of file keys

use memo_crypto::{
    decrypt, detect_format, encrypt, hash_password, verify_password, CryptoError, FileFormat,
};

const PASSWORDS: &[&str] = &["abcd", "correct horse battery staple", "비밀번호123", "p@$$w0rd!"];

const PAYLOADS: &[&str] = &[
    "",
    "x",
    "exactly sixteen!",
    r#"[{"id":"1","content":"Buy milk and eggs and bread","fontSize":14}]"#,
    "line one\nline two\r\n[IMG0] trailing",
];

// ============================================================================
// Round trips
// ============================================================================

#[test]
fn test_roundtrip_all_passwords_and_payloads() {
    for password in PASSWORDS {
        for payload in PAYLOADS {
            let sealed = encrypt(payload, password).unwrap();
            let opened = decrypt(&sealed, password).unwrap();
            assert_eq!(&opened, payload, "password {:?}", password);
        }
    }
}

#[test]
fn test_large_payload_roundtrip() {
    let payload = "note ".repeat(50_000);
    let sealed = encrypt(&payload, "pw-large").unwrap();
    assert_eq!(decrypt(&sealed, "pw-large").unwrap(), payload);
}

// ============================================================================
// Wrong password detection
// ============================================================================

#[test]
fn test_wrong_password_is_detected() {
    let payload = PAYLOADS[3];
    for (i, p1) in PASSWORDS.iter().enumerate() {
        let sealed = encrypt(payload, p1).unwrap();
        for (j, p2) in PASSWORDS.iter().enumerate() {
            if i == j {
                continue;
            }
            match decrypt(&sealed, p2) {
                Err(CryptoError::Decryption(_)) => {}
                other => panic!("expected decryption failure, got {:?}", other),
            }
        }
    }
}

#[test]
fn test_tampered_ciphertext_fails() {
    let sealed = encrypt(PAYLOADS[3], "abcd").unwrap();
    let mut chars: Vec<char> = sealed.chars().collect();
    // Flip a character well inside the last block
    let idx = chars.len() - 6;
    chars[idx] = if chars[idx] == 'A' { 'B' } else { 'A' };
    let tampered: String = chars.into_iter().collect();

    match decrypt(&tampered, "abcd") {
        Ok(text) => assert_ne!(text, PAYLOADS[3]),
        Err(_) => {}
    }
}

// ============================================================================
// Format detection and hashing
// ============================================================================

#[test]
fn test_sealed_output_detected_as_encrypted() {
    for payload in PAYLOADS {
        let sealed = encrypt(payload, "abcd").unwrap();
        assert_eq!(detect_format(&sealed), FileFormat::Encrypted);
    }
    assert_eq!(detect_format(PAYLOADS[3]), FileFormat::PlainJson);
}

#[test]
fn test_hash_does_not_open_files() {
    let hash = hash_password("abcd").unwrap();
    let sealed = encrypt("secret", "abcd").unwrap();

    assert!(verify_password("abcd", &hash).unwrap());
    assert!(decrypt(&sealed, &hash).is_err());
}
