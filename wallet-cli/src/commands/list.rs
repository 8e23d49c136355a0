//! List command - show all wallets

use anyhow::Result;
use colored::Colorize;

use super::get_context;
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let wallets = ctx.wallet_service.list_wallets()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&wallets)?);
        return Ok(());
    }

    if wallets.is_empty() {
        output::warning("No wallets yet. Add one with `wallet add` or run `wallet init`.");
        return Ok(());
    }

    println!("{}", "Wallets".bold());
    println!("{}", output::wallet_table(&wallets));
    Ok(())
}
