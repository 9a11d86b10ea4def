//! Command runners. Wallet work is CPU-bound (scrypt per candidate), so it
//! runs on the blocking pool while the runtime watches for Ctrl-C.

use crate::config::KeywardConfig;
use crate::response::{self, ApiResponse};
use anyhow::{Context, Result};
use keyward_store::SqliteStore;
use keyward_wallet::{
    CancelFlag, CreateWalletRequest, CreatedWallet, RestoreWalletRequest, RestoredWallet,
    WalletService,
};
use std::sync::Arc;

pub type Service = Arc<WalletService<SqliteStore>>;

/// Open the database under the configured data dir and build the service.
pub fn open_service(config: &KeywardConfig) -> Result<Service> {
    std::fs::create_dir_all(&config.server.data_dir).with_context(|| {
        format!(
            "Failed to create data dir: {}",
            config.server.data_dir.display()
        )
    })?;

    let db_path = config.db_path();
    let store = SqliteStore::open(&db_path)
        .with_context(|| format!("Failed to open database: {}", db_path.display()))?;
    log::info!("Database: {}", db_path.display());

    Ok(Arc::new(
        WalletService::new(store).with_policy(config.wallet_policy()),
    ))
}

pub async fn create(
    service: Service,
    req: CreateWalletRequest,
) -> Result<ApiResponse<CreatedWallet>> {
    let result = tokio::task::spawn_blocking(move || service.create_wallet(&req))
        .await
        .context("Create task failed")?;
    Ok(response::created(result))
}

/// Run the restore scan; Ctrl-C sets `cancel` and waits for the scan to stop.
pub async fn restore(
    service: Service,
    req: RestoreWalletRequest,
    cancel: CancelFlag,
) -> Result<ApiResponse<RestoredWallet>> {
    let worker_flag = cancel.clone();
    let mut handle = tokio::task::spawn_blocking(move || {
        service.restore_wallet_with_cancel(&req, &worker_flag)
    });

    let joined = tokio::select! {
        joined = &mut handle => joined,
        _ = tokio::signal::ctrl_c() => {
            log::info!("Received shutdown signal. Cancelling restore…");
            cancel.cancel();
            handle.await
        }
    };

    let result = joined.context("Restore task failed")?;
    Ok(response::restored(result))
}
