//! Request and response types for the wallet service.
//!
//! Field names match the JSON contract with the HTTP layer
//! (`wallet_name`, `passphrase`, `secret_phrase`). Types carrying secrets
//! are zeroized on drop and redact them in `Debug`.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::WalletError;

/// Create a wallet. An empty passphrase means "no passphrase".
#[derive(Clone, Default, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct CreateWalletRequest {
    pub wallet_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub passphrase: String,
}

impl CreateWalletRequest {
    pub fn new(wallet_name: impl Into<String>, passphrase: impl Into<String>) -> Self {
        Self {
            wallet_name: wallet_name.into(),
            passphrase: passphrase.into(),
        }
    }
}

impl fmt::Debug for CreateWalletRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateWalletRequest")
            .field("wallet_name", &self.wallet_name)
            .field("passphrase", &redacted(&self.passphrase))
            .finish()
    }
}

/// Restore a wallet from its secret phrase.
///
/// `wallet_name` is accepted for clients that send it but does not narrow
/// the scan: wallets are matched by secret phrase alone.
#[derive(Clone, Default, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct RestoreWalletRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_name: Option<String>,
    pub secret_phrase: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub passphrase: String,
}

impl RestoreWalletRequest {
    pub fn new(secret_phrase: impl Into<String>, passphrase: impl Into<String>) -> Self {
        Self {
            wallet_name: None,
            secret_phrase: secret_phrase.into(),
            passphrase: passphrase.into(),
        }
    }
}

impl fmt::Debug for RestoreWalletRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestoreWalletRequest")
            .field("wallet_name", &self.wallet_name)
            .field("secret_phrase", &redacted(&self.secret_phrase))
            .field("passphrase", &redacted(&self.passphrase))
            .finish()
    }
}

/// Result of wallet creation. `secret_phrase` is handed out exactly once.
#[derive(Clone, Serialize, Zeroize, ZeroizeOnDrop)]
pub struct CreatedWallet {
    pub wallet_id: String,
    pub address: String,
    pub secret_phrase: String,
}

impl fmt::Debug for CreatedWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreatedWallet")
            .field("wallet_id", &self.wallet_id)
            .field("address", &self.address)
            .field("secret_phrase", &"<redacted>")
            .finish()
    }
}

/// Result of a successful restoration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoredWallet {
    pub wallet_id: String,
    pub addresses: Vec<String>,
}

fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<empty>"
    } else {
        "<redacted>"
    }
}

/// Request validation limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalletPolicy {
    /// Minimum wallet name length in characters
    pub min_name_len: usize,
    /// Maximum wallet name length in characters
    pub max_name_len: usize,
}

impl Default for WalletPolicy {
    fn default() -> Self {
        Self {
            min_name_len: 3,
            max_name_len: 50,
        }
    }
}

impl WalletPolicy {
    pub fn validate_create(&self, req: &CreateWalletRequest) -> Result<(), WalletError> {
        let len = req.wallet_name.chars().count();
        if len < self.min_name_len || len > self.max_name_len {
            return Err(WalletError::InvalidRequest(format!(
                "wallet_name must be {}-{} characters",
                self.min_name_len, self.max_name_len
            )));
        }
        Ok(())
    }

    pub fn validate_restore(&self, req: &RestoreWalletRequest) -> Result<(), WalletError> {
        if req.secret_phrase.trim().is_empty() {
            return Err(WalletError::InvalidRequest(
                "secret_phrase is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_length_bounds() {
        let policy = WalletPolicy::default();
        assert!(policy.validate_create(&CreateWalletRequest::new("ab", "")).is_err());
        assert!(policy.validate_create(&CreateWalletRequest::new("abc", "")).is_ok());
        assert!(policy
            .validate_create(&CreateWalletRequest::new("a".repeat(50), ""))
            .is_ok());
        assert!(policy
            .validate_create(&CreateWalletRequest::new("a".repeat(51), ""))
            .is_err());
    }

    #[test]
    fn test_name_length_counts_characters() {
        let policy = WalletPolicy::default();
        // 3 characters, 9 bytes
        assert!(policy.validate_create(&CreateWalletRequest::new("钱包钱", "")).is_ok());
    }

    #[test]
    fn test_blank_phrase_rejected() {
        let policy = WalletPolicy::default();
        assert!(policy.validate_restore(&RestoreWalletRequest::new("", "")).is_err());
        assert!(policy.validate_restore(&RestoreWalletRequest::new("   ", "")).is_err());
        assert!(policy.validate_restore(&RestoreWalletRequest::new("word", "")).is_ok());
    }

    #[test]
    fn test_request_json_contract() {
        let req: RestoreWalletRequest =
            serde_json::from_str(r#"{"secret_phrase":"a b c","wallet_name":"Main"}"#).unwrap();
        assert_eq!(req.secret_phrase, "a b c");
        assert_eq!(req.wallet_name.as_deref(), Some("Main"));
        assert!(req.passphrase.is_empty());

        let req: CreateWalletRequest =
            serde_json::from_str(r#"{"wallet_name":"Main","passphrase":"hunter2"}"#).unwrap();
        assert_eq!(req.wallet_name, "Main");
        assert_eq!(req.passphrase, "hunter2");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let req = RestoreWalletRequest::new("legal winner thank", "hunter2");
        let out = format!("{:?}", req);
        assert!(!out.contains("legal"));
        assert!(!out.contains("hunter2"));

        let created = CreatedWallet {
            wallet_id: "w".into(),
            address: "0xabc".into(),
            secret_phrase: "legal winner thank".into(),
        };
        let out = format!("{:?}", created);
        assert!(out.contains("0xabc"));
        assert!(!out.contains("legal"));
    }
}
