//! Chain-specific types and error definitions.

use std::fmt;
use std::str::FromStr;

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::blockchain::units::EthAmount;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// The two networks the tool can talk to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Sepolia testnet.
    #[default]
    Sepolia,
    /// Ethereum mainnet.
    Mainnet,
}

impl Network {
    /// EIP-155 chain id.
    pub fn chain_id(self) -> ChainId {
        match self {
            Network::Sepolia => ChainId(11_155_111),
            Network::Mainnet => ChainId(1),
        }
    }

    /// Public endpoints used when no override is configured, primary first.
    pub fn default_rpc_urls(self) -> Vec<String> {
        let urls: &[&str] = match self {
            Network::Mainnet => &[
                "https://cloudflare-eth.com",
                "https://rpc.ankr.com/eth",
                "https://eth.public-rpc.com",
            ],
            Network::Sepolia => &[
                "https://rpc.sepolia.org",
                "https://sepolia.drpc.org",
                "https://rpc.notadegen.com/sepolia",
            ],
        };
        urls.iter().map(|u| u.to_string()).collect()
    }

    pub fn name(self) -> &'static str {
        match self {
            Network::Sepolia => "sepolia",
            Network::Mainnet => "mainnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sepolia" => Ok(Network::Sepolia),
            "mainnet" => Ok(Network::Mainnet),
            other => Err(format!("unknown network '{}' (expected sepolia or mainnet)", other)),
        }
    }
}

/// Current gas figures for a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasEstimate {
    pub gas_limit: u64,
    /// Price per unit of gas in wei.
    pub gas_price: u128,
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// Key is not a well-formed secp256k1 private key.
    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    /// Address text could not be parsed.
    #[error("Invalid address '{input}': {reason}")]
    InvalidAddress { input: String, reason: String },

    /// Amount text could not be converted to wei.
    #[error("Invalid amount '{input}': {reason}")]
    InvalidAmount { input: String, reason: String },

    /// Configured RPC endpoint is not a usable URL.
    #[error("Invalid RPC URL '{url}': {reason}")]
    InvalidRpcUrl { url: String, reason: String },

    /// RPC connection or request failed.
    #[error("Network error: {0}")]
    Network(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Node refused to estimate gas for the transfer.
    #[error("Gas estimation failed: {0}")]
    GasEstimation(String),

    /// Value plus maximum fee exceeds the sender's balance.
    #[error("Insufficient funds: transfer needs {required} ETH but balance is {available} ETH")]
    InsufficientFunds {
        required: EthAmount,
        available: EthAmount,
    },

    /// Node rejected the signed transaction.
    #[error("Broadcast rejected: {0}")]
    Broadcast(String),

    /// Local signing failed.
    #[error("Signing failed: {0}")]
    Signing(String),

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// Parse a user-supplied address.
///
/// Requires the `0x` prefix and 40 hex digits. All-lowercase and
/// all-uppercase input is accepted as is; mixed case must carry a valid
/// EIP-55 checksum.
pub fn parse_address(input: &str) -> BlockchainResult<Address> {
    let invalid = |reason: &str| BlockchainError::InvalidAddress {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = input.trim();
    let hex = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(|| invalid("missing 0x prefix"))?;

    if hex.len() != 40 {
        return Err(invalid("expected 40 hex digits"));
    }
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid("contains non-hex characters"));
    }

    let has_lower = hex.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = hex.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        let normalized = format!("0x{}", hex);
        return Address::parse_checksummed(&normalized, None)
            .map_err(|_| invalid("bad EIP-55 checksum"));
    }

    Address::from_str(hex).map_err(|e| invalid(&e.to_string()))
}
