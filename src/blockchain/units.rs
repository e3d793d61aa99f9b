//! Exact ETH ↔ wei conversion.
//!
//! Amounts are parsed from decimal text straight into integer wei. No
//! floating point is involved at any step.

use std::fmt;
use std::str::FromStr;

use alloy::primitives::U256;

use crate::blockchain::types::BlockchainError;

/// Number of decimals in one ETH.
pub const ETH_DECIMALS: usize = 18;

/// 10^18.
pub const WEI_PER_ETH: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// An amount of ETH held as integer wei.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct EthAmount(U256);

impl EthAmount {
    pub const ZERO: Self = Self(U256::ZERO);

    pub fn from_wei(wei: U256) -> Self {
        Self(wei)
    }

    pub fn wei(self) -> U256 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl FromStr for EthAmount {
    type Err = BlockchainError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| BlockchainError::InvalidAmount {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let text = input.trim();
        if text.is_empty() {
            return Err(invalid("empty amount"));
        }

        let (whole, fraction) = match text.split_once('.') {
            Some((w, f)) => (w, f),
            None => (text, ""),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("no digits"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid("expected a non-negative decimal number"));
        }
        if fraction.len() > ETH_DECIMALS {
            return Err(invalid("more than 18 decimal places"));
        }

        let whole_wei = if whole.is_empty() {
            U256::ZERO
        } else {
            U256::from_str_radix(whole, 10)
                .ok()
                .and_then(|w| w.checked_mul(WEI_PER_ETH))
                .ok_or_else(|| invalid("amount too large"))?
        };

        let fraction_wei = if fraction.is_empty() {
            U256::ZERO
        } else {
            let padded = format!("{:0<width$}", fraction, width = ETH_DECIMALS);
            U256::from_str_radix(&padded, 10).map_err(|e| invalid(&e.to_string()))?
        };

        whole_wei
            .checked_add(fraction_wei)
            .map(Self)
            .ok_or_else(|| invalid("amount too large"))
    }
}

impl fmt::Display for EthAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / WEI_PER_ETH;
        let remainder = self.0 % WEI_PER_ETH;

        if remainder.is_zero() {
            return write!(f, "{}", whole);
        }

        let remainder_str = format!("{:0>width$}", remainder.to_string(), width = ETH_DECIMALS);
        write!(f, "{}.{}", whole, remainder_str.trim_end_matches('0'))
    }
}
