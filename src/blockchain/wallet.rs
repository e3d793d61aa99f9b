//! Named signing keys.
//!
//! # Security
//! - Keys are held as `SecretString` and inside alloy's `PrivateKeySigner`
//! - `Debug` never shows key material
//! - Keys are never logged

use std::fmt;

use alloy::consensus::SignableTransaction;
use alloy::network::TxSignerSync;
use alloy::primitives::{Address, Signature};
use alloy::signers::local::PrivateKeySigner;
use secrecy::SecretString;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// Environment variable that may carry the key for `add-wallet`.
pub const PRIVATE_KEY_ENV_VAR: &str = "FLASH_PRIVATE_KEY";

/// A named private key plus its derived address.
#[derive(Clone)]
pub struct Wallet {
    name: String,
    /// Normalized key: 64 hex digits, no `0x`.
    key: SecretString,
    signer: PrivateKeySigner,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// Accepts 64 hex digits with or without a `0x` prefix; surrounding
    /// whitespace is ignored.
    pub fn from_private_key(name: &str, private_key_hex: &str) -> BlockchainResult<Self> {
        let key_hex = normalize_key(private_key_hex)?;

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| BlockchainError::InvalidKey(format!("not a valid secp256k1 key: {}", e)))?;

        tracing::debug!(wallet = %name, address = %signer.address(), "Wallet key loaded");

        Ok(Self {
            name: name.to_string(),
            key: SecretString::from(key_hex),
            signer,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Normalized key for persistence. Callers must not log it.
    pub(crate) fn private_key(&self) -> &SecretString {
        &self.key
    }

    /// Sign a transaction in place over its EIP-155 signing hash.
    pub fn sign_transaction(
        &self,
        tx: &mut dyn SignableTransaction<Signature>,
    ) -> BlockchainResult<Signature> {
        self.signer
            .sign_transaction_sync(tx)
            .map_err(|e| BlockchainError::Signing(e.to_string()))
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("name", &self.name)
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

/// Strip whitespace and `0x`, then require exactly 64 hex digits.
fn normalize_key(raw: &str) -> BlockchainResult<String> {
    let trimmed = raw.trim();
    let key = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if key.len() != 64 || !key.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(BlockchainError::InvalidKey(
            "must be 64 hex characters (with or without 0x prefix)".to_string(),
        ));
    }
    Ok(key.to_string())
}
