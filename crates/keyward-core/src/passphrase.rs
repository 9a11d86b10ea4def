//! Wallet passphrase hashing
//!
//! Produces a self-describing Argon2id PHC string (`$argon2id$v=19$...`)
//! with an embedded random salt. The hash is only a fast pre-filter for
//! restoration; it never feeds the envelope key.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::rngs::OsRng;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PassphraseError {
    #[error("Passphrase hashing failed: {0}")]
    HashFailed(String),
}

/// Hash `passphrase` with Argon2id default parameters and a fresh salt.
pub fn hash_passphrase(passphrase: &str) -> Result<String, PassphraseError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(passphrase.as_bytes(), &salt)
        .map_err(|e| PassphraseError::HashFailed(e.to_string()))?;
    Ok(hash.to_string())
}

/// Check `passphrase` against a stored PHC string.
///
/// A malformed stored hash is treated as a mismatch.
pub fn verify_passphrase(hash: &str, passphrase: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(passphrase.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_verify_roundtrip() {
        let hash = hash_passphrase("hunter2").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_passphrase(&hash, "hunter2"));
    }

    #[test]
    fn test_wrong_passphrase_rejected() {
        let hash = hash_passphrase("hunter2").unwrap();
        assert!(!verify_passphrase(&hash, "hunter3"));
        assert!(!verify_passphrase(&hash, ""));
    }

    #[test]
    fn test_salt_differs_per_call() {
        let h1 = hash_passphrase("same").unwrap();
        let h2 = hash_passphrase("same").unwrap();
        assert_ne!(h1, h2);
        assert!(verify_passphrase(&h1, "same"));
        assert!(verify_passphrase(&h2, "same"));
    }

    #[test]
    fn test_malformed_hash_is_false() {
        assert!(!verify_passphrase("", "hunter2"));
        assert!(!verify_passphrase("not-a-phc-string", "hunter2"));
        assert!(!verify_passphrase("$2a$10$abcdefghijklmnopqrstuv", "hunter2"));
    }

    #[test]
    fn test_unicode_passphrase() {
        let hash = hash_passphrase("密码是很安全的東西!").unwrap();
        assert!(verify_passphrase(&hash, "密码是很安全的東西!"));
    }
}
