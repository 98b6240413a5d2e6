//! Submission gateway for the capped custodial ledger
//!
//! Owns one ledger instance, built from environment configuration, and
//! exposes its operations over HTTP. Deposits and withdrawals always act on
//! the authenticated caller.

pub mod auth;
pub mod config;
pub mod credits;
pub mod error;
pub mod handlers;
pub mod models;
pub mod rate_limit;
pub mod router;
pub mod state;
