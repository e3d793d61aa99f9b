//! Local wallet state.
//!
//! # Data Flow
//! ```text
//! wallet_state.json
//!     → wallet_store.rs (load, validate each entry)
//!     → Wallet (name, key, derived address)
//!
//! add-wallet:
//!     → validate name + key
//!     → write full document to a temp file, fsync
//!     → rename over wallet_state.json
//! ```
//!
//! # Security Constraints
//! - The file holds raw private keys; its confidentiality is the operator's job
//! - Nothing here logs or prints key material
//! - Concurrent processes adding wallets can lose an update, never corrupt the file

pub mod error;
pub mod wallet_store;

pub use error::{StoreError, StoreResult};
pub use wallet_store::WalletStore;
