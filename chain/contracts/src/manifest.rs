//! Deployment manifest: constructor arguments and their digest
//!
//! A verifier that knows the constructor arguments a ledger was supposedly
//! built with recomputes the digest and compares it with the one the
//! running instance reports.

use bank_types::units::Wei;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::LEDGER_ABI_VERSION;

/// What a running ledger reports about how it was constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentManifest {
    pub abi_version: String,
    pub bank_cap: Wei,
    pub withdraw_cap_per_tx: Wei,
    /// Hex SHA-256 over the ABI version and both constructor arguments
    pub constructor_digest: String,
}

impl DeploymentManifest {
    pub fn new(bank_cap: Wei, withdraw_cap_per_tx: Wei) -> Self {
        Self {
            abi_version: LEDGER_ABI_VERSION.to_string(),
            bank_cap,
            withdraw_cap_per_tx,
            constructor_digest: constructor_digest(
                LEDGER_ABI_VERSION,
                bank_cap,
                withdraw_cap_per_tx,
            ),
        }
    }

    /// Whether this manifest matches the given constructor arguments.
    pub fn verify(&self, bank_cap: Wei, withdraw_cap_per_tx: Wei) -> bool {
        self.bank_cap == bank_cap
            && self.withdraw_cap_per_tx == withdraw_cap_per_tx
            && self.constructor_digest
                == constructor_digest(&self.abi_version, bank_cap, withdraw_cap_per_tx)
    }
}

/// Digest of the constructor arguments, rendered as decimal strings.
pub fn constructor_digest(abi_version: &str, bank_cap: Wei, withdraw_cap_per_tx: Wei) -> String {
    let mut hasher = Sha256::new();
    hasher.update(abi_version.as_bytes());
    hasher.update([0u8]);
    hasher.update(bank_cap.to_string().as_bytes());
    hasher.update([0u8]);
    hasher.update(withdraw_cap_per_tx.to_string().as_bytes());
    hex::encode(hasher.finalize())
}
