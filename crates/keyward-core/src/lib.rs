//! Keyward Core
//!
//! Cryptographic building blocks for Keyward wallets.
//!
//! # Wallet secrets
//!
//! - 12-word BIP-39 mnemonic, generated once per wallet
//! - Sealed at rest with AES-256-GCM under a scrypt key derived from
//!   (passphrase, wallet id)
//! - Optional passphrase stored only as an Argon2id hash
//!
//! # Addresses
//!
//! One Ethereum address per wallet via BIP-44: m/44'/60'/0'/0/0

pub mod address;
pub mod crypto;
pub mod kdf;
pub mod mnemonic;
pub mod passphrase;

pub use address::{derive_address, KeyError};
pub use crypto::{decrypt_mnemonic, encrypt_mnemonic, CryptoError};
pub use mnemonic::{generate_mnemonic, mnemonic_to_seed, SeedError};
pub use passphrase::{hash_passphrase, verify_passphrase, PassphraseError};
