use bank_contracts::LedgerStats;
use bank_contracts::events::LedgerEvent;
use bank_contracts::manifest::DeploymentManifest;
use bank_contracts::vault::Vault;
use bank_types::ids::AccountId;
use bank_types::units::Wei;
use serde::{Deserialize, Serialize};

/// Body of deposit and withdraw requests; `amount` is a wei string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmountRequest {
    pub amount: Wei,
}

/// Confirmation of a committed operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    pub status: String,
    pub event: LedgerEvent,
    pub vault: Vault,
}

impl Receipt {
    pub fn confirmed(event: LedgerEvent, vault: Vault) -> Self {
        Self {
            status: "confirmed".to_string(),
            event,
            vault,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultView {
    pub account_id: AccountId,
    #[serde(flatten)]
    pub vault: Vault,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleasedView {
    pub account_id: AccountId,
    pub released: Wei,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerInfo {
    pub manifest: DeploymentManifest,
    pub stats: LedgerStats,
}
