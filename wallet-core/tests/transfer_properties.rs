//! Transfer properties checked against every store adapter

mod common;

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use common::{balances, pair, total, LostWriteStore, StoreFactory};
use wallet_core::adapters::memory::InMemoryWalletStore;
use wallet_core::domain::ErrorKind;
use wallet_core::services::TransferService;
use wallet_core::{Error, TransferSide, Wallet};

// ============================================================================
// Properties
// ============================================================================

fn valid_transfer_moves_amount(factory: StoreFactory) {
    let cases = [
        (dec!(1000), dec!(500), dec!(300)),
        (dec!(1000), dec!(500), dec!(1000)),
        (dec!(0.05), dec!(0), dec!(0.05)),
        (dec!(12345.67), dec!(0.33), dec!(0.01)),
    ];

    for (a, b, amount) in cases {
        let store = factory(&pair(a, b));
        let service = TransferService::new(store.clone());

        let receipt = service.transfer(1, 2, amount).unwrap();
        assert_eq!(receipt.source_balance, a - amount);
        assert_eq!(receipt.target_balance, b + amount);

        let after = balances(store.as_ref());
        assert_eq!(after[&1], a - amount, "source for {} -> {}", a, amount);
        assert_eq!(after[&2], b + amount, "target for {} -> {}", b, amount);
        assert_eq!(total(store.as_ref()), a + b);
    }
}

fn non_positive_amount_is_rejected(factory: StoreFactory) {
    let store = factory(&pair(dec!(1000), dec!(500)));
    let service = TransferService::new(store.clone());
    let before = balances(store.as_ref());

    for amount in [dec!(0), dec!(-100), dec!(-0.01)] {
        let err = service.transfer(1, 2, amount).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidAmount, "amount {}", amount);
    }
    assert_eq!(balances(store.as_ref()), before);
}

fn insufficient_balance_leaves_state_unchanged(factory: StoreFactory) {
    let store = factory(&pair(dec!(1000), dec!(500)));
    let service = TransferService::new(store.clone());
    let before = balances(store.as_ref());

    let err = service.transfer(1, 2, dec!(1500)).unwrap_err();
    match err {
        Error::InsufficientBalance {
            wallet_id,
            available,
            requested,
        } => {
            assert_eq!(wallet_id, 1);
            assert_eq!(available, dec!(1000));
            assert_eq!(requested, dec!(1500));
        }
        other => panic!("Expected InsufficientBalance, got {:?}", other),
    }
    assert_eq!(balances(store.as_ref()), before);

    let empty = factory(&pair(dec!(0), dec!(500)));
    let err = TransferService::new(empty.clone())
        .transfer(1, 2, dec!(0.01))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientBalance);
    assert_eq!(balances(empty.as_ref())[&1], dec!(0));
}

fn missing_wallet_is_not_found(factory: StoreFactory) {
    let store = factory(&[Wallet::new(2, "Target", dec!(500))]);
    let service = TransferService::new(store.clone());

    let err = service.transfer(99, 2, dec!(10)).unwrap_err();
    assert!(matches!(err, Error::WalletNotFound(99)));
    assert_eq!(balances(store.as_ref())[&2], dec!(500));

    let err = service.transfer(2, 99, dec!(10)).unwrap_err();
    assert!(matches!(err, Error::WalletNotFound(99)));
    assert_eq!(balances(store.as_ref())[&2], dec!(500));
}

fn lost_target_write_restores_source(factory: StoreFactory) {
    let inner = factory(&pair(dec!(1000), dec!(500)));
    let service = TransferService::new(Arc::new(LostWriteStore::new(inner.clone(), 2)));

    let err = service.transfer(1, 2, dec!(300)).unwrap_err();
    assert!(matches!(
        err,
        Error::UpdateFailed {
            wallet_id: 2,
            side: TransferSide::Target
        }
    ));

    let after = balances(inner.as_ref());
    assert_eq!(after[&1], dec!(1000));
    assert_eq!(after[&2], dec!(500));
}

fn lost_source_write_leaves_target(factory: StoreFactory) {
    let inner = factory(&pair(dec!(1000), dec!(500)));
    let service = TransferService::new(Arc::new(LostWriteStore::new(inner.clone(), 1)));

    let err = service.transfer(1, 2, dec!(300)).unwrap_err();
    assert!(matches!(
        err,
        Error::UpdateFailed {
            wallet_id: 1,
            side: TransferSide::Source
        }
    ));

    let after = balances(inner.as_ref());
    assert_eq!(after[&1], dec!(1000));
    assert_eq!(after[&2], dec!(500));
}

fn repeated_failures_are_stable(factory: StoreFactory) {
    let store = factory(&pair(dec!(1000), dec!(500)));
    let service = TransferService::new(store.clone());
    let before = balances(store.as_ref());

    let attempts: [(i32, i32, Decimal, ErrorKind); 4] = [
        (1, 2, dec!(0), ErrorKind::InvalidAmount),
        (1, 2, dec!(5000), ErrorKind::InsufficientBalance),
        (7, 2, dec!(10), ErrorKind::WalletNotFound),
        (1, 1, dec!(10), ErrorKind::InvalidRequest),
    ];

    for _ in 0..5 {
        for (source, target, amount, expected) in attempts {
            let err = service.transfer(source, target, amount).unwrap_err();
            assert_eq!(err.kind(), expected);
            assert_eq!(balances(store.as_ref()), before);
        }
    }
}

fn chained_transfers_preserve_total(factory: StoreFactory) {
    let store = factory(&wallet_core_defaults());
    let service = TransferService::new(store.clone());
    let start = total(store.as_ref());

    service.transfer(1, 2, dec!(2500)).unwrap();
    service.transfer(2, 3, dec!(6000)).unwrap();
    service.transfer(3, 1, dec!(12500)).unwrap();
    assert!(service.transfer(2, 1, dec!(0.01)).is_err());

    let after = balances(store.as_ref());
    assert_eq!(after[&1], dec!(20000));
    assert_eq!(after[&2], dec!(0));
    assert_eq!(after[&3], dec!(0));
    assert_eq!(total(store.as_ref()), start);
}

fn wallet_core_defaults() -> Vec<Wallet> {
    vec![
        Wallet::new(1, "Omar Alashour", dec!(10000)),
        Wallet::new(2, "Khalid Alashour", dec!(3500)),
        Wallet::new(3, "Ali Hassan", dec!(6500)),
    ]
}

// ============================================================================
// Per-adapter instantiation
// ============================================================================

macro_rules! transfer_properties {
    ($adapter:ident, $factory:path) => {
        mod $adapter {
            use super::*;

            #[test]
            fn test_valid_transfer_moves_amount() {
                valid_transfer_moves_amount($factory);
            }

            #[test]
            fn test_non_positive_amount_is_rejected() {
                non_positive_amount_is_rejected($factory);
            }

            #[test]
            fn test_insufficient_balance_leaves_state_unchanged() {
                insufficient_balance_leaves_state_unchanged($factory);
            }

            #[test]
            fn test_missing_wallet_is_not_found() {
                missing_wallet_is_not_found($factory);
            }

            #[test]
            fn test_lost_target_write_restores_source() {
                lost_target_write_restores_source($factory);
            }

            #[test]
            fn test_lost_source_write_leaves_target() {
                lost_source_write_leaves_target($factory);
            }

            #[test]
            fn test_repeated_failures_are_stable() {
                repeated_failures_are_stable($factory);
            }

            #[test]
            fn test_chained_transfers_preserve_total() {
                chained_transfers_preserve_total($factory);
            }
        }
    };
}

transfer_properties!(in_memory, common::memory_store);
transfer_properties!(duckdb, common::duckdb_store);

// ============================================================================
// Fake-only observations
// ============================================================================

#[test]
fn test_debit_is_written_before_credit() {
    let store = Arc::new(InMemoryWalletStore::with_wallets(pair(dec!(1000), dec!(500))));
    let service = TransferService::new(store.clone());

    service.transfer(1, 2, dec!(300)).unwrap();

    let writes = store.write_log();
    assert_eq!(writes.len(), 2);
    assert_eq!((writes[0].id, writes[0].balance), (1, dec!(700)));
    assert_eq!((writes[1].id, writes[1].balance), (2, dec!(800)));
    assert_eq!(store.commit_count(), 1);
}

#[test]
fn test_unavailable_store_surfaces_storage_error() {
    let store = Arc::new(InMemoryWalletStore::with_wallets(pair(dec!(1000), dec!(500))));
    let service = TransferService::new(store.clone());
    store.set_unavailable(true);

    let err = service.transfer(1, 2, dec!(300)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Storage);

    store.set_unavailable(false);
    assert_eq!(store.balance(1), Some(dec!(1000)));
    assert_eq!(store.balance(2), Some(dec!(500)));
}
