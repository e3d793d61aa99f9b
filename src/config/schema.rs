//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML and every
//! field has a default, so an empty file (or no file) is a valid config.
//! Unknown keys are rejected so a misplaced setting cannot be silently ignored.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::blockchain::types::Network;

/// Default location of the wallet document.
pub const DEFAULT_STATE_FILE: &str = "wallet_state.json";

/// Root configuration for the tool.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Path of the wallet state document.
    pub state_file: PathBuf,

    /// Chain connection settings.
    pub chain: ChainConfig,

    /// Logging settings.
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            state_file: PathBuf::from(DEFAULT_STATE_FILE),
            chain: ChainConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Network selection and RPC behaviour.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChainConfig {
    /// Network all commands run against.
    pub network: Network,

    /// Fabricate broadcasts instead of submitting them. Only set from the CLI.
    #[serde(skip)]
    pub mock: bool,

    /// Per-call RPC timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Percentage added on top of the node's gas price (0 = as quoted).
    pub gas_price_bump_percent: u64,

    /// Endpoint lists, primary first.
    pub endpoints: EndpointsConfig,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            network: Network::default(),
            mock: false,
            rpc_timeout_secs: 10,
            gas_price_bump_percent: 0,
            endpoints: EndpointsConfig::default(),
        }
    }
}

impl ChainConfig {
    /// Endpoints for the selected network.
    pub fn rpc_urls(&self) -> &[String] {
        self.endpoints.for_network(self.network)
    }
}

/// RPC endpoints for each network.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EndpointsConfig {
    pub sepolia: Vec<String>,
    pub mainnet: Vec<String>,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            sepolia: Network::Sepolia.default_rpc_urls(),
            mainnet: Network::Mainnet.default_rpc_urls(),
        }
    }
}

impl EndpointsConfig {
    pub fn for_network(&self, network: Network) -> &[String] {
        match network {
            Network::Sepolia => &self.sepolia,
            Network::Mainnet => &self.mainnet,
        }
    }

    pub fn set_for_network(&mut self, network: Network, urls: Vec<String>) {
        match network {
            Network::Sepolia => self.sepolia = urls,
            Network::Mainnet => self.mainnet = urls,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "flash_tx=info".to_string(),
        }
    }
}
