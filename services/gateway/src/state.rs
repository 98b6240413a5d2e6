use crate::config::GatewayConfig;
use crate::credits::ExternalCredits;
use crate::rate_limit::RateLimiter;
use bank_contracts::SharedLedger;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub ledger: SharedLedger,
    pub credits: ExternalCredits,
    pub rate_limiter: Arc<RateLimiter>,
    pub jwt_secret: Arc<str>,
}

impl AppState {
    /// Deploy a fresh ledger with the configured caps.
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            ledger: SharedLedger::new(config.bank_cap, config.withdraw_cap_per_tx),
            credits: ExternalCredits::new(),
            rate_limiter: Arc::new(RateLimiter::new(
                config.rate_limit_capacity,
                config.rate_limit_refill_per_sec,
            )),
            jwt_secret: Arc::from(config.jwt_secret.as_str()),
        }
    }
}
