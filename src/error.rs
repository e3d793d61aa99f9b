//! Crate-level error joining the subsystem errors.

use thiserror::Error;

use crate::blockchain::BlockchainError;
use crate::config::ConfigError;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Blockchain(#[from] BlockchainError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    /// Process exit status: 2 for configuration problems, 1 for everything
    /// that failed while running a command.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Config(_) => 2,
            Error::Store(_) | Error::Blockchain(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let err = Error::from(StoreError::WalletNotFound("x".into()));
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.to_string(), "Wallet 'x' not found");

        let err = Error::from(BlockchainError::Broadcast("nonce too low".into()));
        assert_eq!(err.exit_code(), 1);

        let err = Error::from(ConfigError::Validation(Vec::new()));
        assert_eq!(err.exit_code(), 2);
    }
}
