//! Passphrase key derivation
//!
//! Derives the 256-bit envelope key from a wallet passphrase using scrypt.
//! The wallet id is the salt, so two wallets never share a key even when
//! both have an empty passphrase.

use scrypt::Params;
use thiserror::Error;
use zeroize::Zeroizing;

/// scrypt cost: N = 2^15 = 32768
pub const SCRYPT_LOG_N: u8 = 15;
/// scrypt block size
pub const SCRYPT_R: u32 = 8;
/// scrypt parallelism
pub const SCRYPT_P: u32 = 1;
/// 256 bits for AES-256
pub const KEY_LEN: usize = 32;

#[derive(Error, Debug)]
pub enum KdfError {
    #[error("Key derivation failed: {0}")]
    Failed(String),
}

/// Derive the envelope key for `wallet_id` from `passphrase`.
///
/// The key is recomputed on every call and zeroized when dropped.
pub fn derive_key(
    passphrase: &str,
    wallet_id: &str,
) -> Result<Zeroizing<[u8; KEY_LEN]>, KdfError> {
    let params = Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, KEY_LEN)
        .map_err(|e| KdfError::Failed(e.to_string()))?;

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    scrypt::scrypt(
        passphrase.as_bytes(),
        wallet_id.as_bytes(),
        &params,
        &mut key[..],
    )
    .map_err(|e| KdfError::Failed(e.to_string()))?;

    Ok(key)
}
