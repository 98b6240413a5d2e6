//! Scripted walkthrough against a running gateway: deposit 0.01 ether,
//! show the vault, then withdraw 0.005 ether.

use anyhow::Context;
use bank_gateway::auth::issue_token;
use bank_gateway::models::{AmountRequest, Receipt, VaultView};
use bank_types::ids::AccountId;
use bank_types::units::Wei;
use std::env;
use tracing_subscriber::EnvFilter;

fn ether(amount: Wei) -> String {
    amount
        .to_ether()
        .map(|value| value.to_string())
        .unwrap_or_else(|| format!("{} wei", amount))
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let base_url = env::var("GATEWAY_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());
    let secret = env::var("JWT_SECRET").unwrap_or_else(|_| "secret".to_string());
    let account = match env::var("ACCOUNT_ID") {
        Ok(raw) => raw.parse::<AccountId>().context("ACCOUNT_ID is not a valid account id")?,
        Err(_) => AccountId::new(),
    };
    let token = issue_token(&secret, account, 3600).context("failed to issue token")?;
    let client = reqwest::Client::new();

    tracing::info!(%account, gateway = %base_url, "Interacting with ledger");

    let deposit = AmountRequest {
        amount: Wei::parse_ether("0.01")?,
    };
    let receipt: Receipt = client
        .post(format!("{}/v1/deposit", base_url))
        .bearer_auth(&token)
        .json(&deposit)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    tracing::info!(seq = receipt.event.seq(), "Deposited {} ETH", ether(deposit.amount));

    let view: VaultView = client
        .get(format!("{}/v1/vaults/{}", base_url, account))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    tracing::info!(
        balance = %view.vault.balance,
        total_deposited = %view.vault.total_deposited,
        total_withdrawn = %view.vault.total_withdrawn,
        "Vault"
    );

    let withdrawal = AmountRequest {
        amount: Wei::parse_ether("0.005")?,
    };
    let receipt: Receipt = client
        .post(format!("{}/v1/withdraw", base_url))
        .bearer_auth(&token)
        .json(&withdrawal)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    tracing::info!(
        seq = receipt.event.seq(),
        balance = %receipt.vault.balance,
        "Withdrew {} ETH",
        ether(withdrawal.amount)
    );

    Ok(())
}
