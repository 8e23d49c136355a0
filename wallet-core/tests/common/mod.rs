//! Shared helpers for wallet-core integration tests

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use rust_decimal::Decimal;

use wallet_core::adapters::duckdb::DuckDbWalletStore;
use wallet_core::adapters::memory::InMemoryWalletStore;
use wallet_core::domain::Result;
use wallet_core::ports::{UnitOfWork, WalletStore};
use wallet_core::{Wallet, WalletId};

/// Builds a store pre-populated with the given wallets
pub type StoreFactory = fn(&[Wallet]) -> Arc<dyn WalletStore>;

pub fn memory_store(wallets: &[Wallet]) -> Arc<dyn WalletStore> {
    Arc::new(InMemoryWalletStore::with_wallets(wallets.iter().cloned()))
}

pub fn duckdb_store(wallets: &[Wallet]) -> Arc<dyn WalletStore> {
    let store = DuckDbWalletStore::open_in_memory().expect("Failed to open in-memory DuckDB");
    store.ensure_schema().expect("Failed to initialize schema");
    insert_all(&store, wallets);
    Arc::new(store)
}

pub fn insert_all(store: &dyn WalletStore, wallets: &[Wallet]) {
    let mut unit = store.begin().unwrap();
    for wallet in wallets {
        unit.insert(wallet).unwrap();
    }
    unit.commit().unwrap();
}

/// Two wallets used by most scenarios: {1: a, 2: b}
pub fn pair(a: Decimal, b: Decimal) -> Vec<Wallet> {
    vec![Wallet::new(1, "Test User 1", a), Wallet::new(2, "Test User 2", b)]
}

/// Committed balances keyed by wallet id
pub fn balances(store: &dyn WalletStore) -> BTreeMap<WalletId, Decimal> {
    store
        .list_wallets()
        .unwrap()
        .into_iter()
        .map(|w| (w.id, w.balance))
        .collect()
}

pub fn total(store: &dyn WalletStore) -> Decimal {
    balances(store).values().copied().sum()
}

/// Wraps a store so that balance writes to one wallet report zero affected
/// rows, as if the row disappeared between the read and the write.
pub struct LostWriteStore {
    inner: Arc<dyn WalletStore>,
    lost: WalletId,
}

impl LostWriteStore {
    pub fn new(inner: Arc<dyn WalletStore>, lost: WalletId) -> Self {
        Self { inner, lost }
    }
}

impl WalletStore for LostWriteStore {
    fn begin(&self) -> Result<Box<dyn UnitOfWork + '_>> {
        Ok(Box::new(LostWriteUnit {
            inner: self.inner.begin()?,
            lost: self.lost,
        }))
    }
}

struct LostWriteUnit<'a> {
    inner: Box<dyn UnitOfWork + 'a>,
    lost: WalletId,
}

impl UnitOfWork for LostWriteUnit<'_> {
    fn get(&mut self, id: WalletId) -> Result<Wallet> {
        self.inner.get(id)
    }

    fn set_balance(&mut self, id: WalletId, balance: Decimal) -> Result<usize> {
        if id == self.lost {
            return Ok(0);
        }
        self.inner.set_balance(id, balance)
    }

    fn list(&mut self) -> Result<Vec<Wallet>> {
        self.inner.list()
    }

    fn insert(&mut self, wallet: &Wallet) -> Result<usize> {
        self.inner.insert(wallet)
    }

    fn update(&mut self, wallet: &Wallet) -> Result<usize> {
        self.inner.update(wallet)
    }

    fn delete(&mut self, id: WalletId) -> Result<usize> {
        self.inner.delete(id)
    }

    fn commit(self: Box<Self>) -> Result<()> {
        let unit = *self;
        unit.inner.commit()
    }

    fn rollback(self: Box<Self>) -> Result<()> {
        let unit = *self;
        unit.inner.rollback()
    }
}
