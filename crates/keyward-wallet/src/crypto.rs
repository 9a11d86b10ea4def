//! Cryptographic operations used by the wallet service.
//!
//! [`WalletCrypto`] is injected into [`crate::WalletService`] so tests and
//! alternative backends can replace individual steps. [`StandardCrypto`]
//! forwards to `keyward-core`.

use keyward_core::{CryptoError, KeyError, PassphraseError, SeedError};
use zeroize::Zeroizing;

pub trait WalletCrypto: Send + Sync {
    /// Fresh 12-word BIP-39 phrase.
    fn generate_mnemonic(&self) -> Result<Zeroizing<String>, SeedError>;

    /// Seal the phrase under a key derived from (passphrase, wallet id).
    fn encrypt_mnemonic(
        &self,
        mnemonic: &str,
        passphrase: &str,
        wallet_id: &str,
    ) -> Result<String, CryptoError>;

    /// Open a sealed phrase. All failures are one opaque error.
    fn decrypt_mnemonic(
        &self,
        blob: &str,
        passphrase: &str,
        wallet_id: &str,
    ) -> Result<Zeroizing<String>, CryptoError>;

    /// One-way hash stored for the restore pre-filter.
    fn hash_passphrase(&self, passphrase: &str) -> Result<String, PassphraseError>;

    /// False on mismatch or a malformed hash.
    fn verify_passphrase(&self, hash: &str, passphrase: &str) -> bool;

    /// First address (m/44'/60'/0'/0/0) for the phrase.
    fn derive_address(&self, mnemonic: &str) -> Result<String, KeyError>;
}

/// Production crypto: scrypt + AES-256-GCM, Argon2id, BIP-32/44.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardCrypto;

impl WalletCrypto for StandardCrypto {
    fn generate_mnemonic(&self) -> Result<Zeroizing<String>, SeedError> {
        keyward_core::generate_mnemonic()
    }

    fn encrypt_mnemonic(
        &self,
        mnemonic: &str,
        passphrase: &str,
        wallet_id: &str,
    ) -> Result<String, CryptoError> {
        keyward_core::encrypt_mnemonic(mnemonic, passphrase, wallet_id)
    }

    fn decrypt_mnemonic(
        &self,
        blob: &str,
        passphrase: &str,
        wallet_id: &str,
    ) -> Result<Zeroizing<String>, CryptoError> {
        keyward_core::decrypt_mnemonic(blob, passphrase, wallet_id)
    }

    fn hash_passphrase(&self, passphrase: &str) -> Result<String, PassphraseError> {
        keyward_core::hash_passphrase(passphrase)
    }

    fn verify_passphrase(&self, hash: &str, passphrase: &str) -> bool {
        keyward_core::verify_passphrase(hash, passphrase)
    }

    fn derive_address(&self, mnemonic: &str) -> Result<String, KeyError> {
        keyward_core::derive_address(mnemonic)
    }
}
