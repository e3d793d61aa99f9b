//! Command orchestration.
//!
//! # Data Flow
//! ```text
//! cli.rs (parsed verb)
//!     → dispatcher.rs
//!         add-wallet → WalletStore::add
//!         balance    → WalletStore → ChainClient::get_balance
//!         send       → WalletStore → TxBuilder (reads + sign) → ChainClient::broadcast
//!     → outcome.rs (printed on success)
//! ```

pub mod dispatcher;
pub mod outcome;

pub use dispatcher::{Command, CommandKind, Dispatcher, TransferRequest};
pub use outcome::Outcome;
