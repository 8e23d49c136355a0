//! Wallet Core - atomic transfers between wallets in a relational table
//!
//! This crate follows a hexagonal layout:
//!
//! - **domain**: Wallet, transfer request/receipt, error taxonomy
//! - **ports**: the `WalletStore` / `UnitOfWork` storage traits
//! - **services**: transfer orchestration, wallet maintenance, migrations
//! - **adapters**: DuckDB table and an in-memory fake

pub mod adapters;
pub mod config;
pub mod domain;
pub mod migrations;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use adapters::duckdb::DuckDbWalletStore;
use config::Config;
use services::{TransferService, WalletService};

// Re-export commonly used types at crate root
pub use domain::{
    Error, ErrorKind, OperationResult, TransferReceipt, TransferRequest, TransferSide, Wallet,
    WalletId,
};

/// Main context for wallet operations
///
/// Holds the configuration, the opened store and the services built on it.
pub struct WalletContext {
    pub config: Config,
    pub store: Arc<DuckDbWalletStore>,
    pub transfer_service: TransferService,
    pub wallet_service: WalletService,
}

impl WalletContext {
    /// Open the wallet database described by the config in `wallet_dir`
    pub fn new(wallet_dir: &Path) -> Result<Self> {
        let config = Config::load(wallet_dir)
            .with_context(|| format!("Failed to load settings from {:?}", wallet_dir))?;
        Self::with_config(config)
    }

    /// Open the database for an already resolved config.
    ///
    /// Creates the schema when absent and seeds the sample wallets into an
    /// empty table when `seed_defaults` is set.
    pub fn with_config(config: Config) -> Result<Self> {
        let store = Arc::new(
            DuckDbWalletStore::new(&config.db_path)
                .with_context(|| format!("Failed to open database {:?}", config.db_path))?,
        );

        let migrations = store.ensure_schema().context("Failed to initialize schema")?;
        debug!(applied = ?migrations.applied, "Schema ready");

        let transfer_service = TransferService::new(store.clone());
        let wallet_service = WalletService::new(store.clone());

        if config.seed_defaults {
            wallet_service
                .seed_defaults()
                .context("Failed to seed default wallets")?;
        }

        Ok(Self {
            config,
            store,
            transfer_service,
            wallet_service,
        })
    }
}
