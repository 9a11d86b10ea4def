//! Ethereum address derivation from a mnemonic
//!
//! BIP-32 master key from the BIP-39 seed, then the fixed BIP-44 path
//! m/44'/60'/0'/0/0. Only the first receive address is ever derived.

use alloy_primitives::Address;
use bitcoin::bip32::{DerivationPath, Xpriv};
use bitcoin::secp256k1::{PublicKey, Secp256k1};
use bitcoin::Network;
use thiserror::Error;

use crate::mnemonic::mnemonic_to_seed;

/// BIP-44 path for the first Ethereum receive address
pub const ETH_ADDRESS_PATH: &str = "m/44'/60'/0'/0/0";

#[derive(Error, Debug)]
pub enum KeyError {
    #[error("Derivation failed: {0}")]
    DerivationFailed(String),
    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// Derive the EIP-55 checksummed address (`0x...`) for `phrase`.
pub fn derive_address(phrase: &str) -> Result<String, KeyError> {
    let seed = mnemonic_to_seed(phrase);

    let master = Xpriv::new_master(Network::Bitcoin, &seed[..])
        .map_err(|e| KeyError::DerivationFailed(e.to_string()))?;

    let path: DerivationPath = ETH_ADDRESS_PATH
        .parse()
        .map_err(|e: bitcoin::bip32::Error| KeyError::InvalidPath(e.to_string()))?;

    let secp = Secp256k1::new();
    let derived = master
        .derive_priv(&secp, &path)
        .map_err(|e| KeyError::DerivationFailed(e.to_string()))?;

    let public_key = PublicKey::from_secret_key(&secp, &derived.private_key);

    // keccak256 over the 64-byte X||Y, dropping the 0x04 prefix
    let uncompressed = public_key.serialize_uncompressed();
    let address = Address::from_raw_public_key(&uncompressed[1..]);

    Ok(address.to_checksum(None))
}
