//! Wallet service - listing and maintenance of wallet rows
//!
//! These operations share the wallets table with the transfer service but
//! never run inside a transfer.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use crate::domain::{default_wallets, Error, Result, Wallet, WalletId, BALANCE_SCALE};
use crate::ports::WalletStore;

pub struct WalletService {
    store: Arc<dyn WalletStore>,
}

impl WalletService {
    pub fn new(store: Arc<dyn WalletStore>) -> Self {
        Self { store }
    }

    /// All wallets ordered by id
    pub fn list_wallets(&self) -> Result<Vec<Wallet>> {
        self.store.list_wallets()
    }

    /// Insert a new wallet. The holder name must not be blank.
    pub fn add_wallet(&self, id: WalletId, holder: &str, balance: Decimal) -> Result<Wallet> {
        let wallet = Wallet::new(id, require_holder(holder)?, require_balance(balance)?);

        let mut unit = self.store.begin()?;
        match unit.get(id) {
            Ok(_) => {
                return Err(Error::validation(format!("Wallet {} already exists", id)));
            }
            Err(Error::WalletNotFound(_)) => {}
            Err(e) => return Err(e),
        }
        unit.insert(&wallet)?;
        unit.commit()?;

        info!(wallet_id = id, "Wallet added");
        Ok(wallet)
    }

    /// Rewrite holder and balance of an existing wallet
    pub fn update_wallet(&self, id: WalletId, holder: &str, balance: Decimal) -> Result<Wallet> {
        let wallet = Wallet::new(id, require_holder(holder)?, require_balance(balance)?);

        let mut unit = self.store.begin()?;
        if unit.update(&wallet)? == 0 {
            return Err(Error::WalletNotFound(id));
        }
        unit.commit()?;

        info!(wallet_id = id, "Wallet updated");
        Ok(wallet)
    }

    /// Delete a wallet
    pub fn remove_wallet(&self, id: WalletId) -> Result<()> {
        let mut unit = self.store.begin()?;
        if unit.delete(id)? == 0 {
            return Err(Error::WalletNotFound(id));
        }
        unit.commit()?;

        info!(wallet_id = id, "Wallet removed");
        Ok(())
    }

    /// Insert the sample wallets when the table is empty.
    ///
    /// Returns the number of wallets inserted (0 when the table already had rows).
    pub fn seed_defaults(&self) -> Result<usize> {
        let mut unit = self.store.begin()?;
        if !unit.list()?.is_empty() {
            return Ok(0);
        }

        let defaults = default_wallets();
        for wallet in &defaults {
            unit.insert(wallet)?;
        }
        unit.commit()?;

        info!(count = defaults.len(), "Seeded default wallets");
        Ok(defaults.len())
    }
}

fn require_holder(holder: &str) -> Result<&str> {
    let holder = holder.trim();
    if holder.is_empty() {
        return Err(Error::validation("Wallet holder name cannot be empty"));
    }
    Ok(holder)
}

/// The table stores cents; finer balances would be rounded on write
fn require_balance(balance: Decimal) -> Result<Decimal> {
    if balance.normalize().scale() > BALANCE_SCALE {
        return Err(Error::validation(format!(
            "Balance {} has more than {} decimal places",
            balance, BALANCE_SCALE
        )));
    }
    Ok(balance)
}
