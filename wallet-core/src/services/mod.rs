//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case.

pub mod migration;
mod transfer;
mod wallet;

pub use migration::{MigrationResult, MigrationService};
pub use transfer::TransferService;
pub use wallet::WalletService;
