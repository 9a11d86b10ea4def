//! SQLite persistence layer.
//!
//! `wallets` holds one row per wallet, `blockchain_addresses` the derived
//! addresses with a cascading foreign key back to the wallet. Listing order
//! is rowid order, i.e. insertion order.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{ffi, params, Connection};

use crate::models::{BlockchainAddress, Wallet};
use crate::{StoreError, WalletStore, WalletWriter};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS wallets (
        wallet_id          TEXT PRIMARY KEY,
        wallet_name        TEXT NOT NULL,
        encrypted_mnemonic TEXT NOT NULL,
        passphrase_hash    TEXT NOT NULL DEFAULT '',
        created_at         TEXT NOT NULL,
        updated_at         TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS blockchain_addresses (
        address_id TEXT PRIMARY KEY,
        wallet_id  TEXT NOT NULL
                   REFERENCES wallets(wallet_id) ON UPDATE CASCADE ON DELETE CASCADE,
        address    TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_addresses_wallet ON blockchain_addresses(wallet_id);
";

/// SQLite-backed [`WalletStore`].
///
/// One connection behind a mutex: transactions and listings are serialized.
/// The lock is held for the whole [`WalletStore::run_in_transaction`]
/// closure, including any key derivation it performs, so concurrent creates
/// and restore scans queue behind one another.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and run migrations.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;

        // WAL mode for better concurrent read performance
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Self::init(conn)
    }

    /// Private in-memory database, mostly for tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

impl WalletStore for SqliteStore {
    fn run_in_transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&dyn WalletWriter) -> Result<T, E>,
        E: From<StoreError>,
    {
        let mut conn = self.lock()?;
        let tx = conn.transaction().map_err(StoreError::from)?;

        let result = f(&SqliteWriter { conn: &tx });
        match result {
            Ok(value) => {
                tx.commit().map_err(StoreError::from)?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback() {
                    log::error!("Rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }

    fn list_all_wallets(&self) -> Result<Vec<Wallet>, StoreError> {
        let conn = self.lock()?;

        let mut by_wallet: HashMap<String, Vec<BlockchainAddress>> = HashMap::new();
        {
            let mut stmt = conn.prepare(
                "SELECT address_id, wallet_id, address, created_at, updated_at
                 FROM blockchain_addresses ORDER BY rowid",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(BlockchainAddress {
                    address_id: row.get(0)?,
                    wallet_id: row.get(1)?,
                    address: row.get(2)?,
                    created_at: row.get(3)?,
                    updated_at: row.get(4)?,
                })
            })?;
            for address in rows {
                let address = address?;
                by_wallet
                    .entry(address.wallet_id.clone())
                    .or_default()
                    .push(address);
            }
        }

        let mut stmt = conn.prepare(
            "SELECT wallet_id, wallet_name, encrypted_mnemonic, passphrase_hash,
                    created_at, updated_at
             FROM wallets ORDER BY rowid",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Wallet {
                wallet_id: row.get(0)?,
                wallet_name: row.get(1)?,
                encrypted_mnemonic: row.get(2)?,
                passphrase_hash: row.get(3)?,
                created_at: row.get(4)?,
                updated_at: row.get(5)?,
                addresses: Vec::new(),
            })
        })?;

        let mut wallets = Vec::new();
        for wallet in rows {
            let mut wallet = wallet?;
            wallet.addresses = by_wallet.remove(&wallet.wallet_id).unwrap_or_default();
            wallets.push(wallet);
        }
        Ok(wallets)
    }
}

/// Writer bound to an open transaction.
struct SqliteWriter<'a> {
    conn: &'a Connection,
}

impl WalletWriter for SqliteWriter<'_> {
    fn create_wallet_row(&self, wallet: &Wallet) -> Result<(), StoreError> {
        self.conn
            .execute(
                "INSERT INTO wallets
                    (wallet_id, wallet_name, encrypted_mnemonic, passphrase_hash,
                     created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    wallet.wallet_id,
                    wallet.wallet_name,
                    wallet.encrypted_mnemonic,
                    wallet.passphrase_hash,
                    wallet.created_at,
                    wallet.updated_at
                ],
            )
            .map_err(|e| map_conflict(e, "wallet", &wallet.wallet_id))?;
        Ok(())
    }

    fn create_address_row(&self, address: &BlockchainAddress) -> Result<(), StoreError> {
        self.conn
            .execute(
                "INSERT INTO blockchain_addresses
                    (address_id, wallet_id, address, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    address.address_id,
                    address.wallet_id,
                    address.address,
                    address.created_at,
                    address.updated_at
                ],
            )
            .map_err(|e| map_conflict(e, "address", &address.address_id))?;
        Ok(())
    }
}

/// Primary-key and unique violations become [`StoreError::Conflict`].
fn map_conflict(err: rusqlite::Error, kind: &str, id: &str) -> StoreError {
    match err {
        rusqlite::Error::SqliteFailure(ref e, _)
            if e.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                || e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            StoreError::Conflict(format!("{} {}", kind, id))
        }
        other => StoreError::Database(other),
    }
}
