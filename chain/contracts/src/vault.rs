//! Vault: per-account sub-ledger
//!
//! A vault tracks what one account currently holds in the pool and its
//! lifetime deposit and withdrawal totals. An account that never deposited
//! has the zero vault.

use bank_types::units::Wei;
use serde::{Deserialize, Serialize};

/// Per-account vault record.
///
/// Invariant: `balance == total_deposited - total_withdrawn`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vault {
    /// Currently withdrawable amount
    pub balance: Wei,
    /// Cumulative lifetime deposits (never decreases)
    pub total_deposited: Wei,
    /// Cumulative lifetime withdrawals (never decreases)
    pub total_withdrawn: Wei,
}

impl Vault {
    /// The vault after crediting `amount`, or `None` on overflow.
    pub(crate) fn credited(self, amount: Wei) -> Option<Vault> {
        Some(Vault {
            balance: self.balance.checked_add(amount)?,
            total_deposited: self.total_deposited.checked_add(amount)?,
            total_withdrawn: self.total_withdrawn,
        })
    }

    /// The vault after debiting `amount`, or `None` if the balance is short.
    pub(crate) fn debited(self, amount: Wei) -> Option<Vault> {
        Some(Vault {
            balance: self.balance.checked_sub(amount)?,
            total_deposited: self.total_deposited,
            total_withdrawn: self.total_withdrawn.checked_add(amount)?,
        })
    }

    /// Whether the balance equals deposits minus withdrawals.
    pub fn is_consistent(&self) -> bool {
        self.total_deposited.checked_sub(self.total_withdrawn) == Some(self.balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vault_is_zero() {
        let vault = Vault::default();
        assert_eq!(vault.balance, Wei::ZERO);
        assert_eq!(vault.total_deposited, Wei::ZERO);
        assert_eq!(vault.total_withdrawn, Wei::ZERO);
        assert!(vault.is_consistent());
    }

    #[test]
    fn test_credit_then_debit() {
        let vault = Vault::default()
            .credited(Wei::new(10))
            .unwrap()
            .debited(Wei::new(4))
            .unwrap();
        assert_eq!(vault.balance, Wei::new(6));
        assert_eq!(vault.total_deposited, Wei::new(10));
        assert_eq!(vault.total_withdrawn, Wei::new(4));
        assert!(vault.is_consistent());
    }

    #[test]
    fn test_debit_insufficient() {
        let vault = Vault::default().credited(Wei::new(1)).unwrap();
        assert_eq!(vault.debited(Wei::new(2)), None);
    }

    #[test]
    fn test_credit_overflow() {
        let vault = Vault::default().credited(Wei::MAX).unwrap();
        assert_eq!(vault.credited(Wei::new(1)), None);
    }

    #[test]
    fn test_inconsistent_vault_detected() {
        let vault = Vault {
            balance: Wei::new(5),
            total_deposited: Wei::new(5),
            total_withdrawn: Wei::new(1),
        };
        assert!(!vault.is_consistent());
    }
}
