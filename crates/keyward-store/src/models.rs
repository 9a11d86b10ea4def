//! Persisted wallet records.

use chrono::{DateTime, Utc};

/// A stored wallet.
///
/// `encrypted_mnemonic` is the envelope blob; the plaintext phrase is never
/// stored. `passphrase_hash` is empty when the wallet has no passphrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wallet {
    pub wallet_id: String,
    pub wallet_name: String,
    pub encrypted_mnemonic: String,
    pub passphrase_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Owned addresses, eager-loaded by `list_all_wallets`
    pub addresses: Vec<BlockchainAddress>,
}

impl Wallet {
    /// Whether restoring this wallet requires a passphrase.
    pub fn has_passphrase(&self) -> bool {
        !self.passphrase_hash.is_empty()
    }
}

/// An address derived for a wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockchainAddress {
    pub address_id: String,
    pub wallet_id: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
