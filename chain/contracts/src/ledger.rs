//! Ledger: capped custodial pool with per-account vaults
//!
//! Accepts deposits from many accounts into one pool, bounded by an
//! immutable `bank_cap`, and releases value back to its owner in
//! withdrawals bounded by an immutable `withdraw_cap_per_tx`.
//!
//! Every mutating operation is check-then-effect and atomic:
//! 1. All checks run before any state is touched.
//! 2. A withdrawal commits its bookkeeping *before* the outbound transfer,
//!    so a re-entrant call observes the decremented balance.
//! 3. A failed transfer reverts the ledger to the pre-withdrawal
//!    checkpoint, including anything the recipient did while re-entered.

use bank_types::ids::AccountId;
use bank_types::units::Wei;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::errors::LedgerError;
use crate::events::{Deposited, LedgerEvent, Withdrawn};
use crate::journal::Journal;
use crate::manifest::DeploymentManifest;
use crate::payout::Payout;
use crate::vault::Vault;

/// Aggregate view of the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerStats {
    pub total_pooled: Wei,
    pub deposit_count: u64,
    pub withdrawal_count: u64,
    /// Accounts that have ever deposited
    pub accounts: usize,
}

/// Scalar state captured when a withdrawal opens a checkpoint.
#[derive(Debug, Clone, Copy)]
struct Checkpoint {
    mark: usize,
    events_len: usize,
    total_pooled: Wei,
    next_seq: u64,
    deposit_count: u64,
    withdrawal_count: u64,
}

/// The ledger state machine.
///
/// Owns every vault and the pool total. Constructed once with both caps;
/// there is no setter for either.
#[derive(Debug)]
pub struct Ledger {
    bank_cap: Wei,
    withdraw_cap_per_tx: Wei,
    /// Vaults are created on first deposit and never removed
    vaults: HashMap<AccountId, Vault>,
    /// Sum of all vault balances; never above `bank_cap`
    total_pooled: Wei,
    next_seq: u64,
    deposit_count: u64,
    withdrawal_count: u64,
    journal: Journal,
    /// Emitted events log (append-only)
    events: Vec<LedgerEvent>,
}

impl Ledger {
    /// Create a ledger with its two immutable caps, both in wei.
    pub fn new(bank_cap: Wei, withdraw_cap_per_tx: Wei) -> Self {
        debug!(%bank_cap, %withdraw_cap_per_tx, "Ledger constructed");
        Self {
            bank_cap,
            withdraw_cap_per_tx,
            vaults: HashMap::new(),
            total_pooled: Wei::ZERO,
            next_seq: 1,
            deposit_count: 0,
            withdrawal_count: 0,
            journal: Journal::new(),
            events: Vec::new(),
        }
    }

    pub fn bank_cap(&self) -> Wei {
        self.bank_cap
    }

    pub fn withdraw_cap_per_tx(&self) -> Wei {
        self.withdraw_cap_per_tx
    }

    pub fn total_pooled(&self) -> Wei {
        self.total_pooled
    }

    // ───────────────────────── Deposit ─────────────────────────

    /// Deposit `amount` into the caller's own vault.
    ///
    /// Fails with `ZeroAmount`, `CapExceeded` when the pool would rise
    /// above `bank_cap`, or `DepositTotalOverflow` when the vault's lifetime
    /// deposit total would overflow. Emits `Deposited`.
    pub fn deposit(&mut self, account: AccountId, amount: Wei) -> Result<LedgerEvent, LedgerError> {
        if amount.is_zero() {
            warn!(%account, "Deposit rejected: zero amount");
            return Err(LedgerError::ZeroAmount);
        }

        let pooled = self
            .total_pooled
            .checked_add(amount)
            .filter(|pooled| *pooled <= self.bank_cap);

        let Some(pooled) = pooled else {
            warn!(
                %account,
                %amount,
                total_pooled = %self.total_pooled,
                bank_cap = %self.bank_cap,
                "Deposit rejected: bank cap exceeded"
            );
            return Err(LedgerError::CapExceeded {
                total_pooled: self.total_pooled,
                amount,
                bank_cap: self.bank_cap,
            });
        };

        let current = self.get_vault(&account);
        let Some(vault) = current.credited(amount) else {
            warn!(
                %account,
                %amount,
                total_deposited = %current.total_deposited,
                "Deposit rejected: lifetime deposit total would overflow"
            );
            return Err(LedgerError::DepositTotalOverflow {
                account,
                amount,
                total_deposited: current.total_deposited,
            });
        };

        self.write_vault(account, vault);
        self.total_pooled = pooled;
        self.deposit_count += 1;

        let event = LedgerEvent::Deposited(Deposited {
            seq: self.take_seq(),
            account,
            amount,
            new_balance: vault.balance,
        });
        self.events.push(event.clone());

        debug!(
            seq = event.seq(),
            %account,
            %amount,
            new_balance = %vault.balance,
            total_pooled = %self.total_pooled,
            "Deposit committed"
        );
        Ok(event)
    }

    // ───────────────────────── Withdraw ─────────────────────────

    /// Withdraw `amount` from the caller's own vault and release it through
    /// `payout`.
    ///
    /// Checks, first failure wins: `ZeroAmount`, `ExceedsWithdrawLimit`,
    /// `InsufficientBalance`. A failed transfer yields `TransferFailed` and
    /// leaves no trace in the ledger. Emits `Withdrawn` once the transfer
    /// succeeded.
    pub fn withdraw(
        &mut self,
        account: AccountId,
        amount: Wei,
        payout: &mut dyn Payout,
    ) -> Result<LedgerEvent, LedgerError> {
        if amount.is_zero() {
            warn!(%account, "Withdrawal rejected: zero amount");
            return Err(LedgerError::ZeroAmount);
        }

        if amount > self.withdraw_cap_per_tx {
            warn!(
                %account,
                %amount,
                limit = %self.withdraw_cap_per_tx,
                "Withdrawal rejected: per-transaction limit"
            );
            return Err(LedgerError::ExceedsWithdrawLimit {
                amount,
                limit: self.withdraw_cap_per_tx,
            });
        }

        let current = self.get_vault(&account);
        let debited = current
            .debited(amount)
            .zip(self.total_pooled.checked_sub(amount));

        let Some((vault, pooled)) = debited else {
            warn!(
                %account,
                %amount,
                available = %current.balance,
                "Withdrawal rejected: insufficient balance"
            );
            return Err(LedgerError::InsufficientBalance {
                requested: amount,
                available: current.balance,
            });
        };

        // Effects before the external call.
        let checkpoint = self.checkpoint();
        self.write_vault(account, vault);
        self.total_pooled = pooled;
        self.withdrawal_count += 1;

        if let Err(err) = payout.transfer(self, account, amount) {
            self.revert(checkpoint);
            warn!(
                %account,
                %amount,
                error = %err,
                "Withdrawal rolled back: transfer failed"
            );
            return Err(LedgerError::TransferFailed(err));
        }
        self.journal.commit();

        // The recipient may have deposited while re-entered.
        let new_balance = self.get_vault(&account).balance;
        let event = LedgerEvent::Withdrawn(Withdrawn {
            seq: self.take_seq(),
            account,
            amount,
            new_balance,
        });
        self.events.push(event.clone());

        debug!(
            seq = event.seq(),
            %account,
            %amount,
            %new_balance,
            total_pooled = %self.total_pooled,
            reentry_depth = self.journal.depth(),
            "Withdrawal committed"
        );
        Ok(event)
    }

    // ───────────────────────── Queries ─────────────────────────

    /// Snapshot of an account's vault; the zero vault if it never deposited.
    pub fn get_vault(&self, account: &AccountId) -> Vault {
        self.vaults.get(account).copied().unwrap_or_default()
    }

    pub fn stats(&self) -> LedgerStats {
        LedgerStats {
            total_pooled: self.total_pooled,
            deposit_count: self.deposit_count,
            withdrawal_count: self.withdrawal_count,
            accounts: self.vaults.len(),
        }
    }

    /// Constructor arguments and their digest, for deployment verification.
    pub fn manifest(&self) -> DeploymentManifest {
        DeploymentManifest::new(self.bank_cap, self.withdraw_cap_per_tx)
    }

    /// Check the pool invariants: every vault is self-consistent, the pool
    /// equals the sum of balances, and the pool is within the cap.
    pub fn check_invariant(&self) -> bool {
        let sum = self
            .vaults
            .values()
            .try_fold(Wei::ZERO, |acc, vault| acc.checked_add(vault.balance));

        self.vaults.values().all(Vault::is_consistent)
            && sum == Some(self.total_pooled)
            && self.total_pooled <= self.bank_cap
    }

    // ───────────────────────── Events ─────────────────────────

    /// Get all emitted events.
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    // ───────────────────────── Internal ─────────────────────────

    fn write_vault(&mut self, account: AccountId, vault: Vault) {
        let previous = self.vaults.insert(account, vault);
        self.journal.record(account, previous);
    }

    fn take_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn checkpoint(&mut self) -> Checkpoint {
        Checkpoint {
            mark: self.journal.open(),
            events_len: self.events.len(),
            total_pooled: self.total_pooled,
            next_seq: self.next_seq,
            deposit_count: self.deposit_count,
            withdrawal_count: self.withdrawal_count,
        }
    }

    fn revert(&mut self, checkpoint: Checkpoint) {
        for change in self.journal.unwind(checkpoint.mark) {
            match change.previous {
                Some(vault) => {
                    self.vaults.insert(change.account, vault);
                }
                None => {
                    self.vaults.remove(&change.account);
                }
            }
        }
        self.events.truncate(checkpoint.events_len);
        self.total_pooled = checkpoint.total_pooled;
        self.next_seq = checkpoint.next_seq;
        self.deposit_count = checkpoint.deposit_count;
        self.withdrawal_count = checkpoint.withdrawal_count;
    }
}
