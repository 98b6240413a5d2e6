//! Shared ledger handle for concurrent callers
//!
//! Mutations take the write lock for their whole check-effect-transfer
//! sequence, so no two of them interleave. Reads take the read lock and see
//! a consistent snapshot. A payout re-entering the ledger does so through
//! the `&mut Ledger` it is handed and never relocks.

use bank_types::ids::AccountId;
use bank_types::units::Wei;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::errors::LedgerError;
use crate::events::LedgerEvent;
use crate::ledger::{Ledger, LedgerStats};
use crate::manifest::DeploymentManifest;
use crate::payout::Payout;
use crate::vault::Vault;

/// Cloneable handle to one ledger instance.
#[derive(Debug, Clone)]
pub struct SharedLedger {
    inner: Arc<RwLock<Ledger>>,
}

impl SharedLedger {
    pub fn new(bank_cap: Wei, withdraw_cap_per_tx: Wei) -> Self {
        Self::from_ledger(Ledger::new(bank_cap, withdraw_cap_per_tx))
    }

    pub fn from_ledger(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    pub fn deposit(&self, account: AccountId, amount: Wei) -> Result<LedgerEvent, LedgerError> {
        self.inner.write().deposit(account, amount)
    }

    pub fn withdraw(
        &self,
        account: AccountId,
        amount: Wei,
        payout: &mut dyn Payout,
    ) -> Result<LedgerEvent, LedgerError> {
        self.inner.write().withdraw(account, amount, payout)
    }

    /// Deposit and return the event together with the vault as it stood
    /// right after, under one lock.
    pub fn deposit_with_vault(
        &self,
        account: AccountId,
        amount: Wei,
    ) -> Result<(LedgerEvent, Vault), LedgerError> {
        let mut ledger = self.inner.write();
        let event = ledger.deposit(account, amount)?;
        Ok((event, ledger.get_vault(&account)))
    }

    /// Withdraw and return the event together with the vault as it stood
    /// right after, under one lock.
    pub fn withdraw_with_vault(
        &self,
        account: AccountId,
        amount: Wei,
        payout: &mut dyn Payout,
    ) -> Result<(LedgerEvent, Vault), LedgerError> {
        let mut ledger = self.inner.write();
        let event = ledger.withdraw(account, amount, payout)?;
        Ok((event, ledger.get_vault(&account)))
    }

    pub fn vault(&self, account: &AccountId) -> Vault {
        self.inner.read().get_vault(account)
    }

    pub fn stats(&self) -> LedgerStats {
        self.inner.read().stats()
    }

    pub fn manifest(&self) -> DeploymentManifest {
        self.inner.read().manifest()
    }

    /// Run `f` against a consistent read-only view.
    pub fn read<R>(&self, f: impl FnOnce(&Ledger) -> R) -> R {
        f(&self.inner.read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payout::CreditBook;

    #[test]
    fn test_clones_share_state() {
        let shared = SharedLedger::new(Wei::from_ether(100), Wei::from_ether(1));
        let other = shared.clone();
        let acc = AccountId::new();

        shared.deposit(acc, Wei::from_ether(2)).unwrap();
        assert_eq!(other.vault(&acc).balance, Wei::from_ether(2));
        assert_eq!(other.stats().deposit_count, 1);
    }

    #[test]
    fn test_withdraw_with_vault_snapshot() {
        let shared = SharedLedger::new(Wei::from_ether(100), Wei::from_ether(1));
        let mut book = CreditBook::new();
        let acc = AccountId::new();

        let (_, vault) = shared.deposit_with_vault(acc, Wei::from_ether(3)).unwrap();
        assert_eq!(vault.balance, Wei::from_ether(3));

        let (event, vault) = shared
            .withdraw_with_vault(acc, Wei::from_ether(1), &mut book)
            .unwrap();
        assert_eq!(event.new_balance(), vault.balance);
        assert_eq!(vault.total_withdrawn, Wei::from_ether(1));
    }

    #[test]
    fn test_read_closure() {
        let shared = SharedLedger::new(Wei::from_ether(100), Wei::from_ether(1));
        shared.deposit(AccountId::new(), Wei::new(5)).unwrap();
        assert!(shared.read(|ledger| ledger.check_invariant()));
        assert_eq!(shared.read(|ledger| ledger.events().len()), 1);
    }

    #[test]
    fn test_manifest_matches_caps() {
        let shared = SharedLedger::new(Wei::from_ether(100), Wei::from_ether(1));
        assert!(shared
            .manifest()
            .verify(Wei::from_ether(100), Wei::from_ether(1)));
    }
}
