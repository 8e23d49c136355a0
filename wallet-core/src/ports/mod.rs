//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. Services depend
//! only on these traits, not on concrete implementations.

mod wallet_store;

pub use wallet_store::{UnitOfWork, WalletStore};
