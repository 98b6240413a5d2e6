//! Ledger error types
//!
//! Every failure aborts the whole operation with no observable state change.
//! Variants are checked in a fixed order per operation, first match wins.

use bank_types::ids::AccountId;
use bank_types::units::Wei;
use thiserror::Error;

/// Errors returned by ledger operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Amount must be greater than zero")]
    ZeroAmount,

    #[error("Bank cap exceeded: pooled {total_pooled} + {amount} > cap {bank_cap}")]
    CapExceeded {
        total_pooled: Wei,
        amount: Wei,
        bank_cap: Wei,
    },

    /// The vault's lifetime deposit total would leave the `u128` range.
    /// Reported under the same code as `CapExceeded`: no pool could hold it.
    #[error("Lifetime deposits of {account} would overflow: {total_deposited} + {amount}")]
    DepositTotalOverflow {
        account: AccountId,
        amount: Wei,
        total_deposited: Wei,
    },

    #[error("Withdrawal of {amount} exceeds per-transaction limit {limit}")]
    ExceedsWithdrawLimit { amount: Wei, limit: Wei },

    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: Wei, available: Wei },

    #[error("Outbound transfer failed: {0}")]
    TransferFailed(#[from] TransferError),
}

impl LedgerError {
    /// Stable machine-readable code for the failure kind.
    pub fn code(&self) -> &'static str {
        match self {
            LedgerError::ZeroAmount => "ZERO_AMOUNT",
            LedgerError::CapExceeded { .. } | LedgerError::DepositTotalOverflow { .. } => {
                "CAP_EXCEEDED"
            }
            LedgerError::ExceedsWithdrawLimit { .. } => "EXCEEDS_WITHDRAW_LIMIT",
            LedgerError::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            LedgerError::TransferFailed(_) => "TRANSFER_FAILED",
        }
    }
}

/// Errors reported by a `Payout` when value cannot be released
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransferError {
    #[error("Recipient {account} rejected the transfer: {reason}")]
    Rejected { account: AccountId, reason: String },

    #[error("Crediting {amount} to {account} would overflow")]
    Overflow { account: AccountId, amount: Wei },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cap_exceeded_display() {
        let err = LedgerError::CapExceeded {
            total_pooled: Wei::new(90),
            amount: Wei::new(20),
            bank_cap: Wei::new(100),
        };
        assert_eq!(
            err.to_string(),
            "Bank cap exceeded: pooled 90 + 20 > cap 100"
        );
    }

    #[test]
    fn test_deposit_total_overflow_shares_cap_code() {
        let err = LedgerError::DepositTotalOverflow {
            account: AccountId::new(),
            amount: Wei::new(10),
            total_deposited: Wei::MAX,
        };
        assert_eq!(err.code(), "CAP_EXCEEDED");
        assert!(err.to_string().contains("Lifetime deposits"));
    }

    #[test]
    fn test_insufficient_balance_display() {
        let err = LedgerError::InsufficientBalance {
            requested: Wei::new(5),
            available: Wei::new(1),
        };
        assert!(err.to_string().contains("requested 5"));
    }

    #[test]
    fn test_ledger_error_from_transfer() {
        let transfer_err = TransferError::Rejected {
            account: AccountId::new(),
            reason: "fallback reverted".to_string(),
        };
        let ledger_err: LedgerError = transfer_err.into();
        assert!(matches!(ledger_err, LedgerError::TransferFailed(_)));
        assert_eq!(ledger_err.code(), "TRANSFER_FAILED");
    }

    #[test]
    fn test_error_codes_distinct() {
        let codes = [
            LedgerError::ZeroAmount.code(),
            LedgerError::CapExceeded {
                total_pooled: Wei::ZERO,
                amount: Wei::ZERO,
                bank_cap: Wei::ZERO,
            }
            .code(),
            LedgerError::ExceedsWithdrawLimit {
                amount: Wei::ZERO,
                limit: Wei::ZERO,
            }
            .code(),
            LedgerError::InsufficientBalance {
                requested: Wei::ZERO,
                available: Wei::ZERO,
            }
            .code(),
        ];
        let unique: std::collections::HashSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), codes.len());
    }
}
