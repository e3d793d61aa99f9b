//! flash-tx: Ethereum wallet and transfer CLI.
//!
//! # Architecture Overview
//!
//! ```text
//!   argv / .env / config.toml
//!            │
//!            ▼
//!   ┌─────────────────┐      ┌──────────────────┐
//!   │  cli + config   │─────▶│ commands         │
//!   │  (parse, merge) │      │ Dispatcher       │
//!   └─────────────────┘      └────────┬─────────┘
//!                                     │
//!              ┌──────────────────────┼──────────────────────┐
//!              ▼                      ▼                      ▼
//!   ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────┐
//!   │ store            │   │ blockchain       │   │ blockchain       │
//!   │ WalletStore      │   │ TxBuilder        │──▶│ ChainClient      │──▶ JSON-RPC
//!   │ (JSON, atomic)   │   │ (pre-flight+sign)│   │ (reads, broadcast│
//!   └──────────────────┘   └──────────────────┘   │  or MockBroadcast│
//!                                                 └──────────────────┘
//! ```
//!
//! One command runs per process; the wallet document is the only state that
//! outlives it.

pub mod blockchain;
pub mod cli;
pub mod commands;
pub mod config;
pub mod observability;
pub mod store;

mod error;

pub use blockchain::{ChainClient, EthAmount, Network, Wallet};
pub use commands::{Command, Dispatcher, Outcome};
pub use config::AppConfig;
pub use error::{Error, Result};
pub use store::WalletStore;
