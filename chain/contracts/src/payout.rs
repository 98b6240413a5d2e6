//! Outbound value transfer
//!
//! A withdrawal releases value to the account's own control through a
//! `Payout`. The ledger has already committed its bookkeeping when the
//! transfer runs, and hands the payout a mutable ledger handle so a
//! recipient may call back in (re-entry) exactly as a contract fallback can.
//!
//! A payout that returns `Err` must leave no external effect behind,
//! including the effect of any ledger call it made while handling the
//! transfer: the ledger reverts all of them.

use bank_types::ids::AccountId;
use bank_types::units::Wei;
use std::collections::HashMap;

use crate::errors::TransferError;
use crate::ledger::Ledger;

/// Destination for released value.
pub trait Payout {
    fn transfer(
        &mut self,
        ledger: &mut Ledger,
        to: AccountId,
        amount: Wei,
    ) -> Result<(), TransferError>;
}

/// In-process record of value released to each account.
#[derive(Debug, Clone, Default)]
pub struct CreditBook {
    credits: HashMap<AccountId, Wei>,
}

impl CreditBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total value released to `account` so far.
    pub fn credited(&self, account: &AccountId) -> Wei {
        self.credits.get(account).copied().unwrap_or(Wei::ZERO)
    }
}

impl Payout for CreditBook {
    fn transfer(
        &mut self,
        _ledger: &mut Ledger,
        to: AccountId,
        amount: Wei,
    ) -> Result<(), TransferError> {
        let slot = self.credits.entry(to).or_default();
        *slot = slot
            .checked_add(amount)
            .ok_or(TransferError::Overflow { account: to, amount })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_book_accumulates() {
        let mut ledger = Ledger::new(Wei::new(100), Wei::new(10));
        let mut book = CreditBook::new();
        let acc = AccountId::new();

        book.transfer(&mut ledger, acc, Wei::new(3)).unwrap();
        book.transfer(&mut ledger, acc, Wei::new(4)).unwrap();
        assert_eq!(book.credited(&acc), Wei::new(7));
        assert_eq!(book.credited(&AccountId::new()), Wei::ZERO);
    }

    #[test]
    fn test_credit_book_overflow() {
        let mut ledger = Ledger::new(Wei::new(100), Wei::new(10));
        let mut book = CreditBook::new();
        let acc = AccountId::new();

        book.transfer(&mut ledger, acc, Wei::MAX).unwrap();
        let result = book.transfer(&mut ledger, acc, Wei::new(1));
        assert!(matches!(result, Err(TransferError::Overflow { .. })));
        assert_eq!(book.credited(&acc), Wei::MAX);
    }
}
