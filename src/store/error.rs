use thiserror::Error;

use crate::blockchain::types::BlockchainError;

/// Errors raised by the wallet store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Wallet '{0}' already exists")]
    DuplicateWallet(String),

    #[error("Wallet '{0}' not found")]
    WalletNotFound(String),

    #[error("Invalid wallet name: {0}")]
    InvalidName(String),

    /// Key material was rejected (wraps `BlockchainError::InvalidKey`).
    #[error(transparent)]
    Wallet(#[from] BlockchainError),

    /// An entry in the state file is unusable.
    #[error("Wallet state entry '{name}' is corrupt: {reason}")]
    Corrupt { name: String, reason: String },

    #[error("Wallet state I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Wallet state is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
