//! Keyward Store
//!
//! Persistence boundary for wallets and their addresses.
//!
//! The wallet service only sees two traits: [`WalletStore`] for reads and the
//! transaction scope, and [`WalletWriter`] for inserts inside that scope.
//! [`SqliteStore`] is the production implementation.

pub mod models;
pub mod sqlite;

pub use models::{BlockchainAddress, Wallet};
pub use sqlite::SqliteStore;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Record already exists: {0}")]
    Conflict(String),
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Store lock poisoned")]
    LockPoisoned,
}

/// Inserts available inside [`WalletStore::run_in_transaction`].
pub trait WalletWriter {
    /// Insert a wallet row. A duplicate id is a [`StoreError::Conflict`].
    fn create_wallet_row(&self, wallet: &Wallet) -> Result<(), StoreError>;

    /// Insert an address row for an existing wallet.
    fn create_address_row(&self, address: &BlockchainAddress) -> Result<(), StoreError>;
}

/// Wallet persistence consumed by the lifecycle service.
pub trait WalletStore: Send + Sync {
    /// Run `f` in one transaction: commit iff it returns `Ok`, roll back
    /// otherwise. The closure's error is returned unchanged.
    fn run_in_transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&dyn WalletWriter) -> Result<T, E>,
        E: From<StoreError>;

    /// Every wallet with its addresses, in insertion order.
    fn list_all_wallets(&self) -> Result<Vec<Wallet>, StoreError>;
}
