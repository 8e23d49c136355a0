//! Wallet maintenance commands - add, update and remove wallets

use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;
use rust_decimal::Decimal;
use wallet_core::{Error, WalletId};

use super::get_context;
use crate::output;

pub fn run_add(id: WalletId, holder: &str, balance: Decimal) -> Result<()> {
    let ctx = get_context()?;
    let wallet = ctx.wallet_service.add_wallet(id, holder, balance)?;
    output::success(&format!("Added wallet {}", wallet));
    Ok(())
}

pub fn run_update(id: WalletId, holder: &str, balance: Decimal) -> Result<()> {
    let ctx = get_context()?;
    let wallet = ctx.wallet_service.update_wallet(id, holder, balance)?;
    output::success(&format!("Updated wallet {}", wallet));
    Ok(())
}

pub fn run_remove(id: WalletId, force: bool) -> Result<()> {
    let ctx = get_context()?;

    let wallet = match ctx
        .wallet_service
        .list_wallets()?
        .into_iter()
        .find(|w| w.id == id)
    {
        Some(wallet) => wallet,
        None => return Err(Error::WalletNotFound(id).into()),
    };

    if !force {
        println!("\n{}", format!("This will delete wallet {}.", wallet).yellow());

        if !Confirm::new()
            .with_prompt("Are you sure?")
            .default(false)
            .interact()?
        {
            println!("{}\n", "Cancelled".dimmed());
            return Ok(());
        }
    }

    ctx.wallet_service.remove_wallet(id)?;
    output::success(&format!("Removed wallet {}", id));
    Ok(())
}
