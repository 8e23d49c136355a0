//! In-memory wallet store for tests
//!
//! Units of work stage a copy of the table and publish it on commit. The store
//! serialises units behind a single mutex, so a unit sees a stable snapshot.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use rust_decimal::Decimal;

use crate::domain::{Error, Result, Wallet, WalletId};
use crate::ports::{UnitOfWork, WalletStore};

/// A balance write as seen by the store, committed or not
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceWrite {
    pub id: WalletId,
    pub balance: Decimal,
}

#[derive(Debug, Default)]
struct State {
    wallets: BTreeMap<WalletId, Wallet>,
    /// Rows that can be read but whose writes report 0 rows affected
    lost_rows: HashSet<WalletId>,
    unavailable: bool,
    write_log: Vec<BalanceWrite>,
    commits: usize,
    rollbacks: usize,
}

/// Mutex-guarded map standing in for the wallets table
#[derive(Debug, Default)]
pub struct InMemoryWalletStore {
    state: Mutex<State>,
}

impl InMemoryWalletStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the given wallets
    pub fn with_wallets(wallets: impl IntoIterator<Item = Wallet>) -> Self {
        let store = Self::new();
        {
            let mut state = store.state_unchecked();
            for wallet in wallets {
                state.wallets.insert(wallet.id, wallet);
            }
        }
        store
    }

    /// Make writes to `id` report zero affected rows, as if the row vanished
    /// between the read and the write
    pub fn lose_row(&self, id: WalletId) {
        self.state_unchecked().lost_rows.insert(id);
    }

    /// Toggle a simulated storage outage; `begin` fails while it is on
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state_unchecked().unavailable = unavailable;
    }

    /// Committed balance of a wallet
    pub fn balance(&self, id: WalletId) -> Option<Decimal> {
        self.state_unchecked().wallets.get(&id).map(|w| w.balance)
    }

    /// Every balance write attempted so far, in order
    pub fn write_log(&self) -> Vec<BalanceWrite> {
        self.state_unchecked().write_log.clone()
    }

    pub fn commit_count(&self) -> usize {
        self.state_unchecked().commits
    }

    pub fn rollback_count(&self) -> usize {
        self.state_unchecked().rollbacks
    }

    // A panicking test must not poison every later assertion
    fn state_unchecked(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl WalletStore for InMemoryWalletStore {
    fn begin(&self) -> Result<Box<dyn UnitOfWork + '_>> {
        let state = self.state_unchecked();
        if state.unavailable {
            return Err(Error::storage("in-memory store is unavailable"));
        }
        let staged = state.wallets.clone();
        Ok(Box::new(InMemoryUnitOfWork {
            state,
            staged,
            finished: false,
        }))
    }
}

struct InMemoryUnitOfWork<'a> {
    state: MutexGuard<'a, State>,
    staged: BTreeMap<WalletId, Wallet>,
    finished: bool,
}

impl InMemoryUnitOfWork<'_> {
    fn writable(&self, id: WalletId) -> bool {
        self.staged.contains_key(&id) && !self.state.lost_rows.contains(&id)
    }
}

impl UnitOfWork for InMemoryUnitOfWork<'_> {
    fn get(&mut self, id: WalletId) -> Result<Wallet> {
        self.staged.get(&id).cloned().ok_or(Error::WalletNotFound(id))
    }

    fn set_balance(&mut self, id: WalletId, balance: Decimal) -> Result<usize> {
        self.state.write_log.push(BalanceWrite { id, balance });
        if !self.writable(id) {
            return Ok(0);
        }
        if let Some(wallet) = self.staged.get_mut(&id) {
            wallet.balance = balance;
        }
        Ok(1)
    }

    fn list(&mut self) -> Result<Vec<Wallet>> {
        Ok(self.staged.values().cloned().collect())
    }

    fn insert(&mut self, wallet: &Wallet) -> Result<usize> {
        if self.staged.contains_key(&wallet.id) {
            return Err(Error::storage(format!(
                "duplicate key: wallet {} already exists",
                wallet.id
            )));
        }
        self.staged.insert(wallet.id, wallet.clone());
        Ok(1)
    }

    fn update(&mut self, wallet: &Wallet) -> Result<usize> {
        if !self.writable(wallet.id) {
            return Ok(0);
        }
        self.staged.insert(wallet.id, wallet.clone());
        Ok(1)
    }

    fn delete(&mut self, id: WalletId) -> Result<usize> {
        Ok(usize::from(self.staged.remove(&id).is_some()))
    }

    fn commit(mut self: Box<Self>) -> Result<()> {
        self.finished = true;
        let staged = std::mem::take(&mut self.staged);
        self.state.wallets = staged;
        self.state.commits += 1;
        Ok(())
    }

    fn rollback(mut self: Box<Self>) -> Result<()> {
        self.finished = true;
        self.state.rollbacks += 1;
        Ok(())
    }
}

impl Drop for InMemoryUnitOfWork<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.state.rollbacks += 1;
        }
    }
}
