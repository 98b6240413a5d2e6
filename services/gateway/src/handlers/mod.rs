pub mod ledger;
pub mod vault;
