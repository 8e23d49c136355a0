//! Interactive menu - view wallets and transfer money until the user exits

use anyhow::{bail, Result};
use colored::Colorize;
use dialoguer::{Input, Select};
use wallet_core::services::TransferService;
use wallet_core::{TransferReceipt, TransferRequest, WalletContext};

use super::get_context;
use crate::output;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    ViewWallets,
    Transfer,
    Exit,
}

impl MenuChoice {
    const ALL: [MenuChoice; 3] = [MenuChoice::ViewWallets, MenuChoice::Transfer, MenuChoice::Exit];

    fn label(self) -> &'static str {
        match self {
            MenuChoice::ViewWallets => "View all wallets",
            MenuChoice::Transfer => "Transfer money",
            MenuChoice::Exit => "Exit",
        }
    }
}

pub fn run() -> Result<()> {
    if atty::isnt(atty::Stream::Stdin) || atty::isnt(atty::Stream::Stdout) {
        bail!("The menu needs an interactive terminal; use `wallet list` or `wallet transfer` instead");
    }

    let ctx = get_context()?;
    let labels: Vec<&str> = MenuChoice::ALL.iter().map(|c| c.label()).collect();

    loop {
        println!("\n{}", "Wallet Transfer System".bold());
        let index = Select::new()
            .with_prompt("Select an option")
            .items(&labels)
            .default(0)
            .interact()?;

        match MenuChoice::ALL[index] {
            MenuChoice::ViewWallets => show_wallets(&ctx),
            MenuChoice::Transfer => prompt_transfer(&ctx)?,
            MenuChoice::Exit => return Ok(()),
        }
    }
}

fn show_wallets(ctx: &WalletContext) {
    match ctx.wallet_service.list_wallets() {
        Ok(wallets) if wallets.is_empty() => output::warning("No wallets stored"),
        Ok(wallets) => {
            println!("\n{}", "Current Wallets:".bold());
            for wallet in &wallets {
                println!("{}", wallet);
            }
        }
        Err(e) => output::error(&format!("Could not load wallets: {}", e)),
    }
}

/// Prompt errors end the menu; transfer errors are printed and the loop goes on.
fn prompt_transfer(ctx: &WalletContext) -> Result<()> {
    let source: String = Input::new()
        .with_prompt("Enter source wallet ID")
        .interact_text()?;
    let target: String = Input::new()
        .with_prompt("Enter target wallet ID")
        .interact_text()?;
    let amount: String = Input::new()
        .with_prompt("Enter amount to transfer")
        .interact_text()?;

    match transfer_from_input(&ctx.transfer_service, &source, &target, &amount) {
        Ok(receipt) => output::receipt(&receipt),
        Err(e) => output::error(&format!("Transfer failed: {}", e)),
    }
    Ok(())
}

fn transfer_from_input(
    service: &TransferService,
    source: &str,
    target: &str,
    amount: &str,
) -> wallet_core::domain::Result<TransferReceipt> {
    let request = TransferRequest::parse(source, target, amount)?;
    service.execute(&request)
}
