//! Core domain entities
//!
//! Plain data structures with validation logic - no I/O or external dependencies.

pub mod result;
mod transfer;
mod wallet;

pub use result::{Error, ErrorKind, OperationResult, Result, TransferSide};
pub use transfer::{TransferReceipt, TransferRequest};
pub use wallet::{default_wallets, Wallet, WalletId, BALANCE_SCALE};
