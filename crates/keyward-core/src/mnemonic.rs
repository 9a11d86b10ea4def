//! BIP-39 mnemonic generation and seed derivation
//!
//! Wallets use 12-word English phrases (128 bits of entropy + 4-bit
//! checksum). Seed derivation is PBKDF2-HMAC-SHA512 over the raw phrase
//! bytes and deliberately skips word-list and checksum validation: any
//! string yields a seed.

use bip39::{Language, Mnemonic};
use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha512;
use thiserror::Error;
use zeroize::Zeroizing;

/// 128 bits of entropy → 12 words
pub const ENTROPY_LEN: usize = 16;
pub const WORD_COUNT: usize = 12;
pub const SEED_LEN: usize = 64;

const PBKDF2_ROUNDS: u32 = 2048;
const SEED_SALT: &[u8] = b"mnemonic";

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Random source unavailable: {0}")]
    RandomSourceFailure(String),
    #[error("Invalid mnemonic entropy: {0}")]
    InvalidEntropy(String),
}

/// Generate a fresh 12-word mnemonic from the OS CSPRNG.
///
/// A failing entropy source is reported, never retried.
pub fn generate_mnemonic() -> Result<Zeroizing<String>, SeedError> {
    let mut entropy = Zeroizing::new([0u8; ENTROPY_LEN]);
    OsRng
        .try_fill_bytes(&mut entropy[..])
        .map_err(|e| SeedError::RandomSourceFailure(e.to_string()))?;

    mnemonic_from_entropy(&entropy[..])
}

/// Encode raw entropy as an English BIP-39 phrase.
pub fn mnemonic_from_entropy(entropy: &[u8]) -> Result<Zeroizing<String>, SeedError> {
    let mnemonic = Mnemonic::from_entropy_in(Language::English, entropy)
        .map_err(|e| SeedError::InvalidEntropy(e.to_string()))?;
    Ok(Zeroizing::new(mnemonic.to_string()))
}

/// Derive the 64-byte seed for `phrase` with an empty BIP-39 passphrase.
pub fn mnemonic_to_seed(phrase: &str) -> Zeroizing<[u8; SEED_LEN]> {
    let mut seed = Zeroizing::new([0u8; SEED_LEN]);
    pbkdf2_hmac::<Sha512>(phrase.as_bytes(), SEED_SALT, PBKDF2_ROUNDS, &mut seed[..]);
    seed
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABANDON_ABOUT: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_generate_twelve_words() {
        let phrase = generate_mnemonic().unwrap();
        assert_eq!(phrase.split(' ').count(), WORD_COUNT);

        // Generated phrases are valid BIP-39
        assert!(Mnemonic::parse_in(Language::English, phrase.as_str()).is_ok());
    }

    #[test]
    fn test_generate_is_random() {
        let a = generate_mnemonic().unwrap();
        let b = generate_mnemonic().unwrap();
        assert_ne!(*a, *b);
    }

    #[test]
    fn test_zero_entropy_vector() {
        let phrase = mnemonic_from_entropy(&[0u8; ENTROPY_LEN]).unwrap();
        assert_eq!(phrase.as_str(), ABANDON_ABOUT);
    }

    #[test]
    fn test_bad_entropy_length_rejected() {
        assert!(mnemonic_from_entropy(&[0u8; 3]).is_err());
    }

    /// BIP-39 reference seed for "abandon ... about" with an empty passphrase
    #[test]
    fn test_seed_vector() {
        let seed = mnemonic_to_seed(ABANDON_ABOUT);
        assert_eq!(
            hex::encode(&seed[..]),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1\
             9a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
        );
    }

    #[test]
    fn test_seed_matches_bip39_crate() {
        let phrase = generate_mnemonic().unwrap();
        let parsed = Mnemonic::parse_in(Language::English, phrase.as_str()).unwrap();
        assert_eq!(*mnemonic_to_seed(&phrase), parsed.to_seed(""));
    }

    #[test]
    fn test_malformed_phrase_still_seeds() {
        let a = mnemonic_to_seed("not a real mnemonic at all");
        let b = mnemonic_to_seed("not a real mnemonic at all");
        assert_eq!(*a, *b);
        assert_ne!(*a, *mnemonic_to_seed(ABANDON_ABOUT));
        assert_ne!(*mnemonic_to_seed(""), [0u8; SEED_LEN]);
    }
}
