//! Wei amounts and ether conversion
//!
//! Every amount the ledger handles is an unsigned integer count of the
//! smallest indivisible unit. `u128` is required: a 100 ether cap is
//! 10^20 wei, beyond `u64`.
//!
//! Amounts travel as decimal strings on the wire so that no JSON consumer
//! rounds them through a double.

use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Fractional digits of one ether.
pub const ETHER_DECIMALS: u32 = 18;

/// Wei in one ether.
pub const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;

/// Errors converting human-readable ether amounts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    #[error("Malformed amount: {input}")]
    Malformed { input: String },

    #[error("Negative amount: {input}")]
    Negative { input: String },

    #[error("Amount {input} has more than 18 fractional digits")]
    TooPrecise { input: String },

    #[error("Amount {input} does not fit in 128 bits of wei")]
    Overflow { input: String },
}

/// An unsigned amount of wei.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Wei(u128);

impl Wei {
    pub const ZERO: Wei = Wei(0);
    pub const MAX: Wei = Wei(u128::MAX);

    pub const fn new(wei: u128) -> Self {
        Self(wei)
    }

    /// Whole ether, saturating at `Wei::MAX`.
    pub const fn from_ether(ether: u128) -> Self {
        Self(ether.saturating_mul(WEI_PER_ETHER))
    }

    pub const fn get(self) -> u128 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, rhs: Wei) -> Option<Wei> {
        self.0.checked_add(rhs.0).map(Wei)
    }

    pub fn checked_sub(self, rhs: Wei) -> Option<Wei> {
        self.0.checked_sub(rhs.0).map(Wei)
    }

    /// Parse a decimal ether amount such as `"0.5"` into wei.
    pub fn parse_ether(input: &str) -> Result<Wei, UnitError> {
        let value = Decimal::from_str_exact(input.trim()).map_err(|_| UnitError::Malformed {
            input: input.to_string(),
        })?;

        if value.is_sign_negative() && !value.is_zero() {
            return Err(UnitError::Negative {
                input: input.to_string(),
            });
        }

        let value = value.normalize();
        let scale = value.scale();
        if scale > ETHER_DECIMALS {
            return Err(UnitError::TooPrecise {
                input: input.to_string(),
            });
        }

        let mantissa = u128::try_from(value.mantissa().abs()).map_err(|_| UnitError::Overflow {
            input: input.to_string(),
        })?;

        mantissa
            .checked_mul(10u128.pow(ETHER_DECIMALS - scale))
            .map(Wei)
            .ok_or_else(|| UnitError::Overflow {
                input: input.to_string(),
            })
    }

    /// Express the amount in ether.
    ///
    /// Returns `None` above the 96-bit decimal range (~7.9e10 ether).
    pub fn to_ether(self) -> Option<Decimal> {
        let raw = i128::try_from(self.0).ok()?;
        Decimal::try_from_i128_with_scale(raw, ETHER_DECIMALS)
            .ok()
            .map(|d| d.normalize())
    }
}

impl From<u128> for Wei {
    fn from(wei: u128) -> Self {
        Self(wei)
    }
}

impl From<u64> for Wei {
    fn from(wei: u64) -> Self {
        Self(wei as u128)
    }
}

impl fmt::Display for Wei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Wei {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

struct WeiVisitor;

impl<'de> Visitor<'de> for WeiVisitor {
    type Value = Wei;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative integer amount of wei as a decimal string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Wei, E> {
        v.parse::<u128>()
            .map(Wei)
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Wei, E> {
        Ok(Wei(v as u128))
    }
}

impl<'de> Deserialize<'de> for Wei {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(WeiVisitor)
    }
}
