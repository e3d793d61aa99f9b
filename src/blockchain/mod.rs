//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Wallet store (named private keys)
//!     → wallet.rs (key validation, signing)
//!     → client.rs (RPC reads with failover and timeouts)
//!     → transaction.rs (build, pre-flight, sign)
//!     → client.rs (broadcast, or fabricate in mock mode)
//! ```
//!
//! # Security Constraints
//! - Never log private keys or sensitive data
//! - Signing is local; keys never reach the RPC endpoint
//! - All RPC calls have configurable timeouts
//! - Broadcasts are never retried

pub mod client;
pub mod transaction;
pub mod types;
pub mod units;
pub mod wallet;

pub use client::{ChainClient, MockBroadcast, RpcChainClient};
pub use transaction::{build_and_sign, SignedTransaction, TxBuilder, TxParams};
pub use types::{parse_address, BlockchainError, BlockchainResult, ChainId, GasEstimate, Network};
pub use units::EthAmount;
pub use wallet::Wallet;
