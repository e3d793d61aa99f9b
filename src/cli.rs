//! Command-line surface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use secrecy::SecretString;

use crate::blockchain::Network;
use crate::commands::{Command, TransferRequest};
use crate::config::Overrides;

#[derive(Parser)]
#[command(name = "flash-tx", version)]
#[command(about = "Manage Ethereum wallets and send ETH on Sepolia or mainnet", long_about = None)]
pub struct Cli {
    /// Simulate broadcasts; balance, nonce and gas are still read from the network
    #[arg(long, global = true)]
    pub mock: bool,

    /// Network to use (overrides config and FLASH_NETWORK)
    #[arg(long, global = true, value_enum)]
    pub network: Option<Network>,

    /// Path to a TOML config file (default: FLASH_CONFIG, else built-in defaults)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Wallet state file (overrides config and FLASH_STATE_FILE)
    #[arg(long, global = true)]
    pub state_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new wallet
    AddWallet {
        /// Wallet name
        #[arg(long)]
        name: String,

        /// Private key (64 hex chars, with or without 0x prefix)
        #[arg(long, env = "FLASH_PRIVATE_KEY", hide_env_values = true)]
        key: String,
    },

    /// Check a wallet's balance
    Balance {
        /// Wallet name
        #[arg(long)]
        wallet: String,
    },

    /// Send ETH
    Send {
        /// Sending wallet
        #[arg(long = "from")]
        from: String,

        /// Receiving address
        #[arg(long)]
        to: String,

        /// Amount in ETH, e.g. 0.1
        #[arg(long)]
        amount: String,
    },
}

impl Cli {
    /// Settings that take precedence over file and environment.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            network: self.network,
            state_file: self.state_file.clone(),
            mock: self.mock,
        }
    }

    pub fn into_command(self) -> Command {
        match self.command {
            Commands::AddWallet { name, key } => Command::AddWallet {
                name,
                key: SecretString::from(key),
            },
            Commands::Balance { wallet } => Command::Balance { wallet },
            Commands::Send { from, to, amount } => Command::Send(TransferRequest {
                from_wallet: from,
                to_address: to,
                amount_eth: amount,
            }),
        }
    }
}
