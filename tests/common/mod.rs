//! Shared utilities for integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use flash_tx::blockchain::{
    BlockchainError, BlockchainResult, ChainClient, ChainId, GasEstimate, Network,
    SignedTransaction,
};
use flash_tx::EthAmount;

/// Anvil's first account.
pub const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const TEST_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
/// Anvil's second account, used as a recipient.
pub const RECIPIENT: &str = "0x70997970c51812dc3a010c7d01b50e0d17dc79c8";

/// How many times each capability was used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Calls {
    pub chain_id: usize,
    pub balance: usize,
    pub nonce: usize,
    pub estimate_gas: usize,
    pub broadcast: usize,
}

/// In-memory chain that records every call. Clones share the same counters.
#[derive(Debug, Clone)]
pub struct FakeChain {
    pub network: Network,
    pub reported_chain_id: ChainId,
    pub balance: U256,
    pub nonce: u64,
    pub gas: GasEstimate,
    pub broadcast_error: Option<String>,
    calls: Arc<Mutex<Calls>>,
}

impl FakeChain {
    /// Sepolia chain holding `balance_eth` for every address.
    pub fn funded(balance_eth: &str) -> Self {
        let balance: EthAmount = balance_eth.parse().unwrap();
        Self {
            network: Network::Sepolia,
            reported_chain_id: Network::Sepolia.chain_id(),
            balance: balance.wei(),
            nonce: 3,
            gas: GasEstimate {
                gas_limit: 21_000,
                gas_price: 1_000_000_000,
            },
            broadcast_error: None,
            calls: Arc::new(Mutex::new(Calls::default())),
        }
    }

    pub fn calls(&self) -> Calls {
        *self.calls.lock().unwrap()
    }

    fn record(&self, f: impl FnOnce(&mut Calls)) {
        f(&mut self.calls.lock().unwrap());
    }
}

#[async_trait]
impl ChainClient for FakeChain {
    fn network(&self) -> Network {
        self.network
    }

    async fn get_chain_id(&self) -> BlockchainResult<ChainId> {
        self.record(|c| c.chain_id += 1);
        Ok(self.reported_chain_id)
    }

    async fn get_balance(&self, _address: Address) -> BlockchainResult<U256> {
        self.record(|c| c.balance += 1);
        Ok(self.balance)
    }

    async fn get_nonce(&self, _address: Address) -> BlockchainResult<u64> {
        self.record(|c| c.nonce += 1);
        Ok(self.nonce)
    }

    async fn estimate_gas(
        &self,
        _from: Address,
        _to: Address,
        _value: U256,
    ) -> BlockchainResult<GasEstimate> {
        self.record(|c| c.estimate_gas += 1);
        Ok(self.gas)
    }

    async fn broadcast(&self, tx: &SignedTransaction) -> BlockchainResult<TxHash> {
        self.record(|c| c.broadcast += 1);
        match &self.broadcast_error {
            Some(reason) => Err(BlockchainError::Broadcast(reason.clone())),
            None => Ok(tx.hash),
        }
    }
}

/// True for `0x` followed by 64 lowercase hex digits.
pub fn is_tx_hash(text: &str) -> bool {
    text.len() == 66
        && text.starts_with("0x")
        && text[2..].chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}
