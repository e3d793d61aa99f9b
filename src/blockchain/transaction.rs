//! Transaction building and signing.
//!
//! # Responsibilities
//! - Gather nonce, gas and balance for the sender
//! - Pre-flight the total cost against the balance
//! - Build and sign an EIP-155 value transfer locally
//!
//! Signing and encoding are delegated to alloy; nothing here touches the
//! network except the reads done by [`TxBuilder`].

use alloy::consensus::{SignableTransaction, TxEnvelope, TxLegacy};
use alloy::eips::eip2718::Encodable2718;
use alloy::primitives::{Address, Bytes, Signature, TxHash, TxKind, U256};

use crate::blockchain::client::ChainClient;
use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainId};
use crate::blockchain::units::EthAmount;
use crate::blockchain::wallet::Wallet;

/// Chain state a transfer is built against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxParams {
    pub nonce: u64,
    pub gas_limit: u64,
    pub gas_price: u128,
    pub chain_id: ChainId,
    /// Sender balance at the time of the reads, in wei.
    pub balance: U256,
}

/// A signed transfer ready for broadcast.
#[derive(Debug, Clone)]
pub struct SignedTransaction {
    pub nonce: u64,
    pub gas_limit: u64,
    pub gas_price: u128,
    pub to: Address,
    pub value: U256,
    pub chain_id: u64,
    pub signature: Signature,
    /// Keccak hash of the encoded transaction.
    pub hash: TxHash,
    /// EIP-2718 encoding, as sent with `eth_sendRawTransaction`.
    pub raw: Bytes,
}

/// Value plus the maximum fee, or `None` on overflow.
pub fn max_cost(value: U256, gas_limit: u64, gas_price: u128) -> Option<U256> {
    U256::from(gas_limit)
        .checked_mul(U256::from(gas_price))
        .and_then(|fee| fee.checked_add(value))
}

/// Build and sign a plain transfer of `amount` to `to`.
///
/// Fails with [`BlockchainError::InsufficientFunds`] when value plus
/// `gas_limit * gas_price` exceeds `params.balance`. The check is advisory:
/// the balance can change before the transaction is mined.
pub fn build_and_sign(
    wallet: &Wallet,
    to: Address,
    amount: EthAmount,
    params: &TxParams,
) -> BlockchainResult<SignedTransaction> {
    let value = amount.wei();
    match max_cost(value, params.gas_limit, params.gas_price) {
        Some(required) if required <= params.balance => {}
        required => {
            return Err(BlockchainError::InsufficientFunds {
                required: EthAmount::from_wei(required.unwrap_or(U256::MAX)),
                available: EthAmount::from_wei(params.balance),
            });
        }
    }

    let mut tx = TxLegacy {
        chain_id: Some(params.chain_id.0),
        nonce: params.nonce,
        gas_price: params.gas_price,
        gas_limit: params.gas_limit,
        to: TxKind::Call(to),
        value,
        input: Bytes::new(),
    };

    let signature = wallet.sign_transaction(&mut tx)?;
    let signed = tx.into_signed(signature);
    let hash = *signed.hash();
    let raw = Bytes::from(TxEnvelope::from(signed).encoded_2718());

    tracing::debug!(
        wallet = %wallet.name(),
        to = %to,
        nonce = params.nonce,
        tx_hash = %hash,
        "Transaction signed"
    );

    Ok(SignedTransaction {
        nonce: params.nonce,
        gas_limit: params.gas_limit,
        gas_price: params.gas_price,
        to,
        value,
        chain_id: params.chain_id.0,
        signature,
        hash,
        raw,
    })
}

/// Drives the read side of a transfer, then signs it.
pub struct TxBuilder<'a> {
    client: &'a dyn ChainClient,
    wallet: &'a Wallet,
}

impl<'a> TxBuilder<'a> {
    /// Create a new transaction builder.
    pub fn new(client: &'a dyn ChainClient, wallet: &'a Wallet) -> Self {
        Self { client, wallet }
    }

    /// Read chain state for the sender and produce a signed transfer.
    pub async fn build(&self, to: Address, amount: EthAmount) -> BlockchainResult<SignedTransaction> {
        let from = self.wallet.address();

        let expected = self.client.network().chain_id();
        let actual = self.client.get_chain_id().await?;
        if actual != expected {
            return Err(BlockchainError::ChainMismatch {
                expected: expected.0,
                actual: actual.0,
            });
        }

        let balance = self.client.get_balance(from).await?;
        if amount.wei() > balance {
            return Err(BlockchainError::InsufficientFunds {
                required: amount,
                available: EthAmount::from_wei(balance),
            });
        }

        let nonce = self.client.get_nonce(from).await?;
        let gas = self.client.estimate_gas(from, to, amount.wei()).await?;

        tracing::info!(
            from = %from,
            to = %to,
            amount_eth = %amount,
            nonce = nonce,
            gas_limit = gas.gas_limit,
            gas_price = gas.gas_price,
            "Transfer prepared"
        );

        let params = TxParams {
            nonce,
            gas_limit: gas.gas_limit,
            gas_price: gas.gas_price,
            chain_id: expected,
            balance,
        };
        build_and_sign(self.wallet, to, amount, &params)
    }
}
