//! Init command - write settings and prepare the database

use anyhow::{Context, Result};
use wallet_core::config::Config;
use wallet_core::WalletContext;

use super::get_wallet_dir;
use crate::output;

pub fn run(no_seed: bool) -> Result<()> {
    let wallet_dir = get_wallet_dir()?;
    std::fs::create_dir_all(&wallet_dir)
        .with_context(|| format!("Failed to create wallet directory: {:?}", wallet_dir))?;

    // Env overrides apply to this run only and are kept out of settings.json
    let mut stored = Config::from_file(&wallet_dir)
        .with_context(|| format!("Failed to read settings from {:?}", wallet_dir))?;
    stored.seed_defaults = !no_seed;
    stored
        .save(&wallet_dir)
        .context("Failed to write settings")?;

    let mut config = Config::load(&wallet_dir)
        .with_context(|| format!("Failed to load settings from {:?}", wallet_dir))?;
    config.seed_defaults = !no_seed;

    let ctx = WalletContext::with_config(config)?;
    let count = ctx.wallet_service.list_wallets()?.len();

    output::success(&format!("Wallet database ready at {}", ctx.config.db_path.display()));
    output::info(&format!("{} wallet(s) stored", count));
    Ok(())
}
