//! JSON response envelope printed by the binary.
//!
//! Every command prints one `ApiResponse`. `code` follows HTTP status
//! semantics so the output can be proxied unchanged.

use keyward_wallet::{CreatedWallet, RestoredWallet, WalletError};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(code: u16, message: &str, data: T) -> Self {
        Self {
            success: true,
            code,
            message: message.to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(code: u16, message: &str, detail: impl ToString) -> Self {
        Self {
            success: false,
            code,
            message: message.to_string(),
            data: None,
            error: Some(detail.to_string()),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub fn created(result: Result<CreatedWallet, WalletError>) -> ApiResponse<CreatedWallet> {
    match result {
        Ok(wallet) => ApiResponse::ok(201, "wallet created", wallet),
        Err(e @ WalletError::InvalidRequest(_)) => ApiResponse::err(400, "validation error", e),
        Err(e) => ApiResponse::err(500, "create wallet failed", e),
    }
}

pub fn restored(result: Result<RestoredWallet, WalletError>) -> ApiResponse<RestoredWallet> {
    match result {
        Ok(wallet) => ApiResponse::ok(200, "wallet restored", wallet),
        Err(e @ WalletError::InvalidRequest(_)) => ApiResponse::err(400, "validation error", e),
        Err(e @ WalletError::RestoreFailed) => ApiResponse::err(400, "restore failed", e),
        Err(e @ WalletError::Persistence(_)) => ApiResponse::err(500, "cannot load wallets", e),
        Err(e @ WalletError::Cancelled) => ApiResponse::err(408, "request cancelled", e),
        Err(e) => ApiResponse::err(500, "internal error", e),
    }
}
