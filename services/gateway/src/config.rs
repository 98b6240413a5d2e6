//! Gateway configuration from environment variables.

use bank_types::units::Wei;
use std::env;
use std::net::SocketAddr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} is not set (expected an integer amount of wei)")]
    Missing { key: &'static str },

    #[error("{key} has an invalid value: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Runtime configuration for the gateway and the ledger it deploys.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Global ceiling on pooled value
    pub bank_cap: Wei,
    /// Ceiling on a single withdrawal
    pub withdraw_cap_per_tx: Wei,
    pub bind_addr: SocketAddr,
    /// HS256 secret for caller tokens
    pub jwt_secret: String,
    /// Token bucket size per account and route
    pub rate_limit_capacity: u32,
    pub rate_limit_refill_per_sec: f64,
}

impl GatewayConfig {
    /// Configuration with the given caps and local-development defaults.
    pub fn with_caps(bank_cap: Wei, withdraw_cap_per_tx: Wei) -> Self {
        Self {
            bank_cap,
            withdraw_cap_per_tx,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            jwt_secret: "secret".to_string(),
            rate_limit_capacity: 60,
            rate_limit_refill_per_sec: 1.0,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `BANK_CAP`: Global pool ceiling in wei (required)
    /// - `WITHDRAW_CAP`: Per-withdrawal ceiling in wei (required)
    /// - `GATEWAY_ADDR`: Bind address (default: 0.0.0.0:8080)
    /// - `JWT_SECRET`: Token secret (default: secret)
    /// - `RATE_LIMIT_CAPACITY`: Bucket size (default: 60)
    /// - `RATE_LIMIT_REFILL_PER_SEC`: Refill rate (default: 1.0)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bank_cap = required_wei(&lookup, "BANK_CAP")?;
        let withdraw_cap_per_tx = required_wei(&lookup, "WITHDRAW_CAP")?;
        let mut config = Self::with_caps(bank_cap, withdraw_cap_per_tx);

        if let Some(addr) = lookup("GATEWAY_ADDR") {
            config.bind_addr = parse(&addr, "GATEWAY_ADDR")?;
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            config.jwt_secret = secret;
        }
        if let Some(capacity) = lookup("RATE_LIMIT_CAPACITY") {
            config.rate_limit_capacity = parse(&capacity, "RATE_LIMIT_CAPACITY")?;
        }
        if let Some(refill) = lookup("RATE_LIMIT_REFILL_PER_SEC") {
            config.rate_limit_refill_per_sec = parse(&refill, "RATE_LIMIT_REFILL_PER_SEC")?;
        }

        Ok(config)
    }
}

fn required_wei(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Wei, ConfigError> {
    let raw = lookup(key).ok_or(ConfigError::Missing { key })?;
    parse::<u128>(&raw, key).map(Wei::new)
}

fn parse<T: std::str::FromStr>(raw: &str, key: &'static str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: raw.to_string(),
    })
}
