//! Wallet CLI - move money between wallets from the terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use wallet_core::WalletId;

mod commands;
mod logging;
mod output;

use commands::{init, list, menu, transfer, wallet};

/// Wallet - atomic transfers between wallets
#[derive(Parser)]
#[command(name = "wallet", version, about, long_about = None)]
struct Cli {
    /// Defaults to the interactive menu
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu: view wallets and transfer money
    Menu,

    /// List all wallets
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Transfer an amount from one wallet to another
    Transfer {
        /// Source wallet ID
        source: String,
        /// Target wallet ID
        target: String,
        /// Amount with at most two decimal places
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a wallet
    Add {
        id: WalletId,
        holder: String,
        balance: Decimal,
    },

    /// Replace holder and balance of a wallet
    Update {
        id: WalletId,
        holder: String,
        balance: Decimal,
    },

    /// Remove a wallet
    Remove {
        id: WalletId,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Write settings and create the database
    Init {
        /// Do not insert the sample wallets
        #[arg(long)]
        no_seed: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(&commands::configured_log_level());

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

/// `Ok(false)` marks a command that reported its own failure
fn run(cli: Cli) -> Result<bool> {
    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => menu::run().map(|_| true),
        Commands::List { json } => list::run(json).map(|_| true),
        Commands::Transfer {
            source,
            target,
            amount,
            json,
        } => transfer::run(&source, &target, &amount, json),
        Commands::Add {
            id,
            holder,
            balance,
        } => wallet::run_add(id, &holder, balance).map(|_| true),
        Commands::Update {
            id,
            holder,
            balance,
        } => wallet::run_update(id, &holder, balance).map(|_| true),
        Commands::Remove { id, force } => wallet::run_remove(id, force).map(|_| true),
        Commands::Init { no_seed } => init::run(no_seed).map(|_| true),
    }
}
