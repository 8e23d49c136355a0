//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, CellAlignment, ContentArrangement, Table};
use rust_decimal::Decimal;

use wallet_core::{TransferReceipt, Wallet};

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Balances always show two decimal places
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount)
}

/// Table of wallets ordered as given
pub fn wallet_table(wallets: &[Wallet]) -> Table {
    let mut table = create_table();
    table.set_header(vec!["ID", "Holder", "Balance"]);
    for wallet in wallets {
        table.add_row(vec![
            Cell::new(wallet.id),
            Cell::new(&wallet.holder),
            Cell::new(format_amount(wallet.balance)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Print a committed transfer
pub fn receipt(receipt: &TransferReceipt) {
    success(&format!(
        "Transferred {} from wallet {} to wallet {}",
        format_amount(receipt.amount),
        receipt.source_id,
        receipt.target_id
    ));
    println!(
        "  Wallet {}: {}",
        receipt.source_id,
        format_amount(receipt.source_balance)
    );
    println!(
        "  Wallet {}: {}",
        receipt.target_id,
        format_amount(receipt.target_balance)
    );
    println!("  {}", format!("Reference {}", receipt.id).dimmed());
}
