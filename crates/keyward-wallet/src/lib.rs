//! Keyward Wallet
//!
//! Wallet lifecycle over an injected store and crypto backend:
//! [`WalletService::create_wallet`] and [`WalletService::restore_wallet`].
//!
//! ```no_run
//! use keyward_store::SqliteStore;
//! use keyward_wallet::{CreateWalletRequest, RestoreWalletRequest, WalletService};
//!
//! let service = WalletService::new(SqliteStore::open_in_memory()?);
//! let created = service.create_wallet(&CreateWalletRequest::new("Main", ""))?;
//!
//! let restored =
//!     service.restore_wallet(&RestoreWalletRequest::new(created.secret_phrase.as_str(), ""))?;
//! assert_eq!(restored.wallet_id, created.wallet_id);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cancel;
pub mod crypto;
pub mod error;
pub mod service;
pub mod types;

pub use cancel::CancelFlag;
pub use crypto::{StandardCrypto, WalletCrypto};
pub use error::WalletError;
pub use service::WalletService;
pub use types::{
    CreateWalletRequest, CreatedWallet, RestoreWalletRequest, RestoredWallet, WalletPolicy,
};
