//! Types library for the capped custodial bank
//!
//! Value types shared by the ledger core and the submission gateway.
//!
//! # Modules
//! - `ids`: Account identifiers
//! - `units`: Wei amounts and ether conversion

pub mod ids;
pub mod units;
