//! Wallet store port - storage abstraction for the wallets table

use rust_decimal::Decimal;

use crate::domain::{Result, Wallet, WalletId};

/// Storage holding the wallets table.
///
/// Every read and write goes through a [`UnitOfWork`] opened with
/// [`WalletStore::begin`]; nothing touches the table outside one.
pub trait WalletStore: Send + Sync {
    /// Open a new unit of work against the table
    fn begin(&self) -> Result<Box<dyn UnitOfWork + '_>>;

    /// Read all wallets in a short-lived unit of work
    fn list_wallets(&self) -> Result<Vec<Wallet>> {
        let mut unit = self.begin()?;
        let wallets = unit.list()?;
        unit.commit()?;
        Ok(wallets)
    }
}

/// Atomic unit of work over the wallets table.
///
/// Reads see the unit's own pending writes. Writes become durable together on
/// [`UnitOfWork::commit`] and are discarded on [`UnitOfWork::rollback`].
/// Dropping a unit that was neither committed nor rolled back discards its
/// writes as well.
pub trait UnitOfWork {
    // === Transfer operations ===

    /// Fetch a wallet, failing with `WalletNotFound` when no row matches
    fn get(&mut self, id: WalletId) -> Result<Wallet>;

    /// Write a new balance, returning the number of rows affected (0 or 1).
    /// The balance is not validated here.
    fn set_balance(&mut self, id: WalletId, balance: Decimal) -> Result<usize>;

    // === Admin operations ===

    /// All wallets ordered by id
    fn list(&mut self) -> Result<Vec<Wallet>>;

    /// Insert a new row, returning rows affected
    fn insert(&mut self, wallet: &Wallet) -> Result<usize>;

    /// Rewrite holder and balance of an existing row, returning rows affected
    fn update(&mut self, wallet: &Wallet) -> Result<usize>;

    /// Delete a row, returning rows affected
    fn delete(&mut self, id: WalletId) -> Result<usize>;

    // === Completion ===

    fn commit(self: Box<Self>) -> Result<()>;

    fn rollback(self: Box<Self>) -> Result<()>;
}
