use bank_gateway::config::GatewayConfig;
use bank_gateway::router::create_router;
use bank_gateway::state::AppState;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = GatewayConfig::from_env()?;
    tracing::info!(
        bank_cap = %config.bank_cap,
        withdraw_cap_per_tx = %config.withdraw_cap_per_tx,
        "Starting bank gateway"
    );

    let state = AppState::new(&config);
    let manifest = state.ledger.manifest();
    tracing::info!(
        abi_version = %manifest.abi_version,
        constructor_digest = %manifest.constructor_digest,
        "Ledger deployed"
    );

    let limiter = state.rate_limiter.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(60));
        loop {
            ticker.tick().await;
            let evicted = limiter.evict_idle();
            if evicted > 0 {
                tracing::debug!(evicted, "Evicted idle rate-limit buckets");
            }
        }
    });

    let app = create_router(state);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
