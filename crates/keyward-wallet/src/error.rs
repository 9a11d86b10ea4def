//! Wallet lifecycle errors.

use keyward_core::{CryptoError, KeyError, PassphraseError, SeedError};
use keyward_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    /// Includes an unavailable entropy source
    #[error(transparent)]
    Mnemonic(#[from] SeedError),
    #[error(transparent)]
    Crypto(#[from] CryptoError),
    #[error(transparent)]
    Passphrase(#[from] PassphraseError),
    #[error(transparent)]
    Derivation(#[from] KeyError),
    #[error(transparent)]
    Persistence(#[from] StoreError),
    /// No wallet matched. Deliberately says nothing about why.
    #[error("invalid secret phrase or passphrase")]
    RestoreFailed,
    #[error("Operation cancelled")]
    Cancelled,
}
