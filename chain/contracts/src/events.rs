//! Ledger events
//!
//! Events are immutable records of committed operations. `seq` is assigned
//! at emission and increases by one per committed operation; operations that
//! roll back never consume a sequence number.

use bank_types::ids::AccountId;
use bank_types::units::Wei;
use serde::{Deserialize, Serialize};

/// Value added to a vault
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposited {
    pub seq: u64,
    pub account: AccountId,
    pub amount: Wei,
    pub new_balance: Wei,
}

/// Value released from a vault to its owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdrawn {
    pub seq: u64,
    pub account: AccountId,
    pub amount: Wei,
    pub new_balance: Wei,
}

/// Enum wrapper for all ledger events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum LedgerEvent {
    Deposited(Deposited),
    Withdrawn(Withdrawn),
}

impl LedgerEvent {
    pub fn seq(&self) -> u64 {
        match self {
            LedgerEvent::Deposited(e) => e.seq,
            LedgerEvent::Withdrawn(e) => e.seq,
        }
    }

    pub fn account(&self) -> AccountId {
        match self {
            LedgerEvent::Deposited(e) => e.account,
            LedgerEvent::Withdrawn(e) => e.account,
        }
    }

    pub fn amount(&self) -> Wei {
        match self {
            LedgerEvent::Deposited(e) => e.amount,
            LedgerEvent::Withdrawn(e) => e.amount,
        }
    }

    /// Vault balance right after the operation took effect.
    pub fn new_balance(&self) -> Wei {
        match self {
            LedgerEvent::Deposited(e) => e.new_balance,
            LedgerEvent::Withdrawn(e) => e.new_balance,
        }
    }
}
