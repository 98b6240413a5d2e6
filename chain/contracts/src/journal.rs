//! Undo journal for vault mutations
//!
//! While at least one checkpoint is open, every vault write records the
//! record it replaced. Reverting pops entries back to the checkpoint mark;
//! committing the outermost checkpoint discards them. Nested checkpoints
//! (re-entrant operations) keep their entries so an enclosing revert can
//! still undo them.

use bank_types::ids::AccountId;

use crate::vault::Vault;

/// A single undo record: the vault as it was before a write.
/// `None` means the account had no vault entry yet.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct VaultChange {
    pub account: AccountId,
    pub previous: Option<Vault>,
}

#[derive(Debug, Default)]
pub(crate) struct Journal {
    entries: Vec<VaultChange>,
    depth: usize,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a checkpoint and return its mark.
    pub fn open(&mut self) -> usize {
        self.depth += 1;
        self.entries.len()
    }

    pub fn record(&mut self, account: AccountId, previous: Option<Vault>) {
        if self.depth > 0 {
            self.entries.push(VaultChange { account, previous });
        }
    }

    /// Close a checkpoint keeping its changes.
    pub fn commit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        if self.depth == 0 {
            self.entries.clear();
        }
    }

    /// Close a checkpoint, returning the changes made since `mark`, newest first.
    pub fn unwind(&mut self, mark: usize) -> Vec<VaultChange> {
        self.depth = self.depth.saturating_sub(1);
        let mut undone = self.entries.split_off(mark.min(self.entries.len()));
        undone.reverse();
        undone
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bank_types::units::Wei;

    fn vault(balance: u128) -> Vault {
        Vault {
            balance: Wei::new(balance),
            total_deposited: Wei::new(balance),
            total_withdrawn: Wei::ZERO,
        }
    }

    #[test]
    fn test_no_recording_without_checkpoint() {
        let mut journal = Journal::new();
        journal.record(AccountId::new(), None);
        assert_eq!(journal.len(), 0);
    }

    #[test]
    fn test_unwind_returns_newest_first() {
        let mut journal = Journal::new();
        let acc = AccountId::new();
        let mark = journal.open();
        journal.record(acc, None);
        journal.record(acc, Some(vault(1)));

        let undone = journal.unwind(mark);
        assert_eq!(undone.len(), 2);
        assert_eq!(undone[0].previous, Some(vault(1)));
        assert_eq!(undone[1].previous, None);
        assert_eq!(journal.depth(), 0);
    }

    #[test]
    fn test_nested_commit_keeps_entries_for_outer() {
        let mut journal = Journal::new();
        let acc = AccountId::new();
        let outer = journal.open();
        journal.record(acc, Some(vault(5)));

        let _inner = journal.open();
        journal.record(acc, Some(vault(3)));
        journal.commit();
        assert_eq!(journal.len(), 2);

        let undone = journal.unwind(outer);
        assert_eq!(undone.len(), 2);
    }

    #[test]
    fn test_outer_commit_clears() {
        let mut journal = Journal::new();
        journal.open();
        journal.record(AccountId::new(), None);
        journal.commit();
        assert_eq!(journal.len(), 0);
        assert_eq!(journal.depth(), 0);
    }
}
