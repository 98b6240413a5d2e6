//! Capped custodial ledger
//!
//! Accepts deposits from many accounts into one shared pool, tracks each
//! account's contribution in its own vault, and releases value back to the
//! owner subject to a global pool ceiling and a per-withdrawal ceiling.
//!
//! # Modules
//! - `errors`: Ledger and transfer error types
//! - `events`: Deposit and withdrawal events
//! - `vault`: Per-account vault record
//! - `ledger`: The state machine (deposit, withdraw, get_vault)
//! - `payout`: Outbound value transfer seam
//! - `shared`: Lock-guarded handle for concurrent callers
//! - `manifest`: Constructor arguments digest for deployment verification

pub mod errors;
pub mod events;
mod journal;
pub mod ledger;
pub mod manifest;
pub mod payout;
pub mod shared;
pub mod vault;

pub use ledger::{Ledger, LedgerStats};
pub use shared::SharedLedger;

/// Ledger ABI version, frozen after release
pub const LEDGER_ABI_VERSION: &str = "1.0.0";
