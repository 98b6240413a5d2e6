//! External credits: where withdrawn value lands
//!
//! Value released by a withdrawal leaves the pool and is credited here,
//! under the account's own control.

use bank_contracts::Ledger;
use bank_contracts::errors::TransferError;
use bank_contracts::payout::Payout;
use bank_types::ids::AccountId;
use bank_types::units::Wei;
use dashmap::DashMap;
use std::sync::Arc;

/// Released value per account, shared across request handlers.
#[derive(Debug, Clone, Default)]
pub struct ExternalCredits {
    released: Arc<DashMap<AccountId, Wei>>,
}

impl ExternalCredits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn released(&self, account: &AccountId) -> Wei {
        self.released
            .get(account)
            .map(|entry| *entry)
            .unwrap_or(Wei::ZERO)
    }
}

impl Payout for ExternalCredits {
    fn transfer(
        &mut self,
        _ledger: &mut Ledger,
        to: AccountId,
        amount: Wei,
    ) -> Result<(), TransferError> {
        let mut entry = self.released.entry(to).or_insert(Wei::ZERO);
        let released = entry
            .checked_add(amount)
            .ok_or(TransferError::Overflow { account: to, amount })?;
        *entry = released;
        tracing::debug!(account = %to, %amount, %released, "Value released");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_released_balances() {
        let mut ledger = Ledger::new(Wei::new(100), Wei::new(10));
        let mut credits = ExternalCredits::new();
        let view = credits.clone();
        let acc = AccountId::new();

        credits.transfer(&mut ledger, acc, Wei::new(4)).unwrap();
        credits.transfer(&mut ledger, acc, Wei::new(6)).unwrap();
        assert_eq!(view.released(&acc), Wei::new(10));
    }

    #[test]
    fn test_overflow_leaves_balance() {
        let mut ledger = Ledger::new(Wei::new(100), Wei::new(10));
        let mut credits = ExternalCredits::new();
        let acc = AccountId::new();

        credits.transfer(&mut ledger, acc, Wei::MAX).unwrap();
        let result = credits.transfer(&mut ledger, acc, Wei::new(1));
        assert!(matches!(result, Err(TransferError::Overflow { .. })));
        assert_eq!(credits.released(&acc), Wei::MAX);
    }
}
