//! CLI command implementations

pub mod init;
pub mod list;
pub mod menu;
pub mod transfer;
pub mod wallet;

use std::path::PathBuf;

use anyhow::{Context, Result};
use wallet_core::config::{Config, DEFAULT_LOG_LEVEL};
use wallet_core::WalletContext;

/// Env var pointing at the wallet directory
pub const WALLET_DIR_ENV: &str = "WALLET_DIR";

/// Get the wallet directory from environment or default
pub fn get_wallet_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(WALLET_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().context("Could not find home directory")?;
    Ok(home.join(".wallet"))
}

/// Log level from settings, or the default when they cannot be read yet
pub fn configured_log_level() -> String {
    get_wallet_dir()
        .ok()
        .and_then(|dir| Config::load(&dir).ok())
        .map(|config| config.log_level)
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

/// Get or create wallet context
pub fn get_context() -> Result<WalletContext> {
    let wallet_dir = get_wallet_dir()?;

    std::fs::create_dir_all(&wallet_dir)
        .with_context(|| format!("Failed to create wallet directory: {:?}", wallet_dir))?;

    WalletContext::new(&wallet_dir)
}
