//! Wallet creation and restoration.
//!
//! # Creation
//!
//! One store transaction covers: id allocation, mnemonic generation,
//! envelope encryption, optional passphrase hash, wallet insert, first
//! address derivation and address insert. Any failure rolls the whole
//! thing back.
//!
//! # Restoration
//!
//! A linear scan over every stored wallet in insertion order. For each
//! candidate:
//!
//! 1. passphrase-protected wallets are skipped when no passphrase was given
//!    or the stored hash does not verify
//! 2. the envelope is opened with (passphrase, wallet id); failures skip
//! 3. the plaintext must equal the supplied phrase exactly
//!
//! The first match wins. Anything else is a single [`WalletError::RestoreFailed`].
//! Scan time grows with the number of wallets.

use chrono::Utc;
use keyward_store::{BlockchainAddress, Wallet, WalletStore};
use uuid::Uuid;

use crate::cancel::CancelFlag;
use crate::crypto::{StandardCrypto, WalletCrypto};
use crate::error::WalletError;
use crate::types::{
    CreateWalletRequest, CreatedWallet, RestoreWalletRequest, RestoredWallet, WalletPolicy,
};

pub struct WalletService<S, C = StandardCrypto> {
    store: S,
    crypto: C,
    policy: WalletPolicy,
}

impl<S: WalletStore> WalletService<S> {
    /// Service over `store` with the standard crypto backend.
    pub fn new(store: S) -> Self {
        Self::with_crypto(store, StandardCrypto)
    }
}

impl<S: WalletStore, C: WalletCrypto> WalletService<S, C> {
    pub fn with_crypto(store: S, crypto: C) -> Self {
        Self {
            store,
            crypto,
            policy: WalletPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: WalletPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a wallet and its first address.
    ///
    /// The returned [`CreatedWallet::secret_phrase`] is the only time the
    /// plaintext mnemonic leaves the service.
    pub fn create_wallet(&self, req: &CreateWalletRequest) -> Result<CreatedWallet, WalletError> {
        self.policy.validate_create(req)?;

        let created = self
            .store
            .run_in_transaction(|tx| -> Result<CreatedWallet, WalletError> {
                let wallet_id = Uuid::new_v4().to_string();

                let mnemonic = self.crypto.generate_mnemonic()?;
                let encrypted_mnemonic =
                    self.crypto
                        .encrypt_mnemonic(&mnemonic, &req.passphrase, &wallet_id)?;

                let passphrase_hash = if req.passphrase.is_empty() {
                    String::new()
                } else {
                    self.crypto.hash_passphrase(&req.passphrase)?
                };

                let now = Utc::now();
                tx.create_wallet_row(&Wallet {
                    wallet_id: wallet_id.clone(),
                    wallet_name: req.wallet_name.clone(),
                    encrypted_mnemonic,
                    passphrase_hash,
                    created_at: now,
                    updated_at: now,
                    addresses: Vec::new(),
                })?;

                let address = self.crypto.derive_address(&mnemonic)?;
                tx.create_address_row(&BlockchainAddress {
                    address_id: Uuid::new_v4().to_string(),
                    wallet_id: wallet_id.clone(),
                    address: address.clone(),
                    created_at: now,
                    updated_at: now,
                })?;

                Ok(CreatedWallet {
                    wallet_id,
                    address,
                    secret_phrase: mnemonic.as_str().to_owned(),
                })
            })
            .inspect_err(|e| log::warn!("Wallet creation rolled back: {}", e))?;

        log::info!(
            "Created wallet {} (passphrase: {})",
            created.wallet_id,
            !req.passphrase.is_empty()
        );
        Ok(created)
    }

    /// Find the wallet whose sealed mnemonic equals `req.secret_phrase`.
    pub fn restore_wallet(&self, req: &RestoreWalletRequest) -> Result<RestoredWallet, WalletError> {
        self.restore_wallet_with_cancel(req, &CancelFlag::new())
    }

    /// Like [`Self::restore_wallet`], checking `cancel` before each candidate.
    pub fn restore_wallet_with_cancel(
        &self,
        req: &RestoreWalletRequest,
        cancel: &CancelFlag,
    ) -> Result<RestoredWallet, WalletError> {
        self.policy.validate_restore(req)?;

        let wallets = self
            .store
            .list_all_wallets()
            .inspect_err(|e| log::error!("Cannot load wallets: {}", e))?;
        log::debug!("Restore scan over {} wallets", wallets.len());

        for wallet in &wallets {
            if cancel.is_cancelled() {
                log::info!("Restore scan cancelled");
                return Err(WalletError::Cancelled);
            }

            if self.matches(wallet, req) {
                log::info!("Restored wallet {}", wallet.wallet_id);
                return Ok(RestoredWallet {
                    wallet_id: wallet.wallet_id.clone(),
                    addresses: wallet.addresses.iter().map(|a| a.address.clone()).collect(),
                });
            }
        }

        Err(WalletError::RestoreFailed)
    }

    fn matches(&self, wallet: &Wallet, req: &RestoreWalletRequest) -> bool {
        // The hash is only a gate; the key always comes from the raw passphrase
        if wallet.has_passphrase()
            && (req.passphrase.is_empty()
                || !self
                    .crypto
                    .verify_passphrase(&wallet.passphrase_hash, &req.passphrase))
        {
            log::debug!("Skipping wallet {}: passphrase gate", wallet.wallet_id);
            return false;
        }

        match self.crypto.decrypt_mnemonic(
            &wallet.encrypted_mnemonic,
            &req.passphrase,
            &wallet.wallet_id,
        ) {
            Ok(mnemonic) => mnemonic.as_str() == req.secret_phrase,
            Err(_) => {
                log::debug!("Skipping wallet {}: envelope did not open", wallet.wallet_id);
                false
            }
        }
    }
}
