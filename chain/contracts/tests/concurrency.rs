//! Concurrency test
//!
//! Verifies that a shared ledger hammered from many threads never lets two
//! mutations interleave: the cap and every balance hold exactly.

use bank_contracts::errors::LedgerError;
use bank_contracts::payout::CreditBook;
use bank_contracts::SharedLedger;
use bank_types::ids::AccountId;
use bank_types::units::Wei;
use std::thread;

#[test]
fn test_concurrent_deposits_respect_cap() {
    let ledger = SharedLedger::new(Wei::new(5_000), Wei::new(100));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let ledger = ledger.clone();
            thread::spawn(move || {
                let account = AccountId::new();
                let mut accepted = 0u128;
                for _ in 0..1_000 {
                    match ledger.deposit(account, Wei::new(1)) {
                        Ok(_) => accepted += 1,
                        Err(LedgerError::CapExceeded { .. }) => {}
                        Err(other) => panic!("unexpected error: {other}"),
                    }
                }
                (account, accepted)
            })
        })
        .collect();

    let mut total = 0u128;
    for handle in handles {
        let (account, accepted) = handle.join().unwrap();
        assert_eq!(ledger.vault(&account).balance, Wei::new(accepted));
        total += accepted;
    }

    assert_eq!(total, 5_000);
    assert_eq!(ledger.stats().total_pooled, Wei::new(5_000));
    assert!(ledger.read(|l| l.check_invariant()));
}

#[test]
fn test_concurrent_withdrawals_never_double_spend() {
    let ledger = SharedLedger::new(Wei::new(10_000), Wei::new(10));
    let account = AccountId::new();
    ledger.deposit(account, Wei::new(1_000)).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let ledger = ledger.clone();
            thread::spawn(move || {
                let mut book = CreditBook::new();
                for _ in 0..50 {
                    let _ = ledger.withdraw(account, Wei::new(5), &mut book);
                }
                book.credited(&account)
            })
        })
        .collect();

    let released: u128 = handles
        .into_iter()
        .map(|h| h.join().unwrap().get())
        .sum();

    // 8 × 50 × 5 = 2000 attempted, only 1000 deposited
    assert_eq!(released, 1_000);
    let vault = ledger.vault(&account);
    assert_eq!(vault.balance, Wei::ZERO);
    assert_eq!(vault.total_withdrawn, Wei::new(1_000));
    assert_eq!(ledger.stats().withdrawal_count, 200);
}

#[test]
fn test_readers_see_consistent_vaults() {
    let ledger = SharedLedger::new(Wei::new(1_000_000), Wei::new(1_000));
    let account = AccountId::new();

    let writer = {
        let ledger = ledger.clone();
        thread::spawn(move || {
            let mut book = CreditBook::new();
            for _ in 0..500 {
                ledger.deposit(account, Wei::new(7)).unwrap();
                ledger.withdraw(account, Wei::new(3), &mut book).unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let ledger = ledger.clone();
            thread::spawn(move || {
                for _ in 0..500 {
                    assert!(ledger.vault(&account).is_consistent());
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(ledger.vault(&account).balance, Wei::new(2_000));
}
