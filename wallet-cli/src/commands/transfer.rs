//! Transfer command - one-shot transfer between two wallets

use anyhow::Result;
use wallet_core::{OperationResult, TransferReceipt, TransferRequest};

use super::get_context;
use crate::output;

/// Returns whether the transfer committed; the caller maps it to the exit code.
pub fn run(source: &str, target: &str, amount: &str, json: bool) -> Result<bool> {
    let ctx = get_context()?;

    let result = TransferRequest::parse(source, target, amount)
        .and_then(|request| ctx.transfer_service.execute(&request));
    let committed = result.is_ok();

    if json {
        let result: OperationResult<TransferReceipt> = result.into();
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(committed);
    }

    match result {
        Ok(receipt) => output::receipt(&receipt),
        Err(e) => output::error(&format!("Transfer failed: {}", e)),
    }
    Ok(committed)
}
