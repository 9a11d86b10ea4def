//! Envelope encryption for wallet mnemonics
//!
//! The mnemonic is sealed with AES-256-GCM under a key derived on demand
//! from (passphrase, wallet id). Nothing but the sealed blob is stored.
//!
//! # Blob format
//!
//! `base64(nonce (12 bytes) || ciphertext || tag (16 bytes))`, standard
//! alphabet with padding.
//!
//! # Security Notes
//!
//! - Every encryption draws a fresh random 96-bit nonce
//! - Malformed input, a wrong key and tampering all produce the same
//!   [`CryptoError::DecryptionFailed`]

use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;
use zeroize::Zeroizing;

use crate::kdf::{derive_key, KdfError};

/// Nonce length for AES-256-GCM
pub const NONCE_LEN: usize = 12;

#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),
    #[error("Decryption failed: invalid passphrase or corrupted data")]
    DecryptionFailed,
    #[error(transparent)]
    KeyDerivationFailed(#[from] KdfError),
}

/// Seal `plaintext` for `wallet_id` under `passphrase`.
///
/// Returns the base64 blob to persist. Two calls with identical inputs
/// produce different blobs.
pub fn encrypt_mnemonic(
    plaintext: &str,
    passphrase: &str,
    wallet_id: &str,
) -> Result<String, CryptoError> {
    let key = derive_key(passphrase, wallet_id)?;
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key[..]));

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
    let ciphertext = cipher
        .encrypt(&nonce, plaintext.as_bytes())
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

    let mut payload = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    payload.extend_from_slice(&nonce);
    payload.extend_from_slice(&ciphertext);

    Ok(STANDARD.encode(payload))
}

/// Open a blob produced by [`encrypt_mnemonic`].
///
/// # Errors
/// [`CryptoError::DecryptionFailed`] for any bad input: invalid base64,
/// a payload shorter than the nonce, wrong passphrase or wallet id,
/// tampered ciphertext, or non-UTF-8 plaintext.
pub fn decrypt_mnemonic(
    blob: &str,
    passphrase: &str,
    wallet_id: &str,
) -> Result<Zeroizing<String>, CryptoError> {
    let raw = STANDARD
        .decode(blob)
        .map_err(|_| CryptoError::DecryptionFailed)?;
    if raw.len() < NONCE_LEN {
        return Err(CryptoError::DecryptionFailed);
    }
    let (nonce, ciphertext) = raw.split_at(NONCE_LEN);

    let key = derive_key(passphrase, wallet_id)?;
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key[..]));

    let plaintext = Zeroizing::new(
        cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| CryptoError::DecryptionFailed)?,
    );

    let text = std::str::from_utf8(&plaintext).map_err(|_| CryptoError::DecryptionFailed)?;
    Ok(Zeroizing::new(text.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHRASE: &str = "legal winner thank year wave sausage worth useful legal winner thank yellow";

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let blob = encrypt_mnemonic(PHRASE, "correct horse battery staple", "w-1").unwrap();
        let plain = decrypt_mnemonic(&blob, "correct horse battery staple", "w-1").unwrap();
        assert_eq!(plain.as_str(), PHRASE);
    }

    #[test]
    fn test_empty_passphrase_works() {
        let blob = encrypt_mnemonic(PHRASE, "", "w-1").unwrap();
        let plain = decrypt_mnemonic(&blob, "", "w-1").unwrap();
        assert_eq!(plain.as_str(), PHRASE);
    }

    #[test]
    fn test_wrong_passphrase_fails() {
        let blob = encrypt_mnemonic(PHRASE, "right", "w-1").unwrap();
        let result = decrypt_mnemonic(&blob, "wrong", "w-1");
        assert!(matches!(result, Err(CryptoError::DecryptionFailed)));
    }

    #[test]
    fn test_wrong_wallet_id_fails() {
        let blob = encrypt_mnemonic(PHRASE, "right", "w-1").unwrap();
        let result = decrypt_mnemonic(&blob, "right", "w-2");
        assert!(matches!(result, Err(CryptoError::DecryptionFailed)));
    }

    #[test]
    fn test_fresh_nonce_per_call() {
        let blob1 = encrypt_mnemonic(PHRASE, "same", "w-1").unwrap();
        let blob2 = encrypt_mnemonic(PHRASE, "same", "w-1").unwrap();
        assert_ne!(blob1, blob2);

        let raw1 = STANDARD.decode(&blob1).unwrap();
        let raw2 = STANDARD.decode(&blob2).unwrap();
        assert_ne!(raw1[..NONCE_LEN], raw2[..NONCE_LEN]);

        // Both still open to the same plaintext
        assert_eq!(decrypt_mnemonic(&blob1, "same", "w-1").unwrap().as_str(), PHRASE);
        assert_eq!(decrypt_mnemonic(&blob2, "same", "w-1").unwrap().as_str(), PHRASE);
    }

    #[test]
    fn test_blob_layout() {
        let blob = encrypt_mnemonic(PHRASE, "p", "w-1").unwrap();
        let raw = STANDARD.decode(&blob).unwrap();
        // nonce + plaintext + 16-byte GCM tag
        assert_eq!(raw.len(), NONCE_LEN + PHRASE.len() + 16);
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let blob = encrypt_mnemonic(PHRASE, "p", "w-1").unwrap();
        let mut raw = STANDARD.decode(&blob).unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0xFF;
        let tampered = STANDARD.encode(&raw);

        assert!(matches!(
            decrypt_mnemonic(&tampered, "p", "w-1"),
            Err(CryptoError::DecryptionFailed)
        ));
    }

    #[test]
    fn test_short_payload_fails() {
        let short = STANDARD.encode([0u8; NONCE_LEN - 1]);
        assert!(matches!(
            decrypt_mnemonic(&short, "p", "w-1"),
            Err(CryptoError::DecryptionFailed)
        ));
    }

    #[test]
    fn test_invalid_base64_fails() {
        assert!(matches!(
            decrypt_mnemonic("!!not base64!!", "p", "w-1"),
            Err(CryptoError::DecryptionFailed)
        ));
    }

    #[test]
    fn test_failure_modes_indistinguishable() {
        let blob = encrypt_mnemonic(PHRASE, "p", "w-1").unwrap();
        let wrong_key = decrypt_mnemonic(&blob, "q", "w-1").unwrap_err().to_string();
        let corrupt = decrypt_mnemonic("AAAA", "p", "w-1").unwrap_err().to_string();
        assert_eq!(wrong_key, corrupt);
    }
}
