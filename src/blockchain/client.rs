//! Chain access behind the [`ChainClient`] capability.
//!
//! # Responsibilities
//! - Connect to the selected network's JSON-RPC endpoints
//! - Query chain state (chain id, balances, nonces, gas)
//! - Broadcast signed transactions, or fabricate the result in mock mode
//! - Handle timeouts and network errors gracefully

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::transports::TransportResult;
use async_trait::async_trait;
use tokio::time::timeout;

use crate::blockchain::transaction::SignedTransaction;
use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainId, GasEstimate, Network};
use crate::config::schema::ChainConfig;

/// Read and write operations against one network.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Network this client was built for.
    fn network(&self) -> Network;

    /// Whether `broadcast` is fabricated rather than sent.
    fn is_simulated(&self) -> bool {
        false
    }

    /// Chain id reported by the node.
    async fn get_chain_id(&self) -> BlockchainResult<ChainId>;

    /// Balance in wei.
    async fn get_balance(&self, address: Address) -> BlockchainResult<U256>;

    /// Next usable transaction count for `address`.
    async fn get_nonce(&self, address: Address) -> BlockchainResult<u64>;

    /// Gas limit and price for a plain transfer.
    async fn estimate_gas(
        &self,
        from: Address,
        to: Address,
        value: U256,
    ) -> BlockchainResult<GasEstimate>;

    /// Submit a signed transaction. Never retried.
    async fn broadcast(&self, tx: &SignedTransaction) -> BlockchainResult<TxHash>;
}

/// Build the client for `config`: RPC-backed, wrapped in [`MockBroadcast`]
/// when mock mode is on. Performs no I/O.
pub fn connect(config: &ChainConfig) -> BlockchainResult<Box<dyn ChainClient>> {
    let client = RpcChainClient::new(config)?;
    if config.mock {
        tracing::warn!(network = %config.network, "MOCK MODE - no transactions will be broadcast");
        Ok(Box::new(MockBroadcast::new(client)))
    } else {
        Ok(Box::new(client))
    }
}

/// JSON-RPC client wrapper with failover support for reads.
#[derive(Clone)]
pub struct RpcChainClient {
    network: Network,
    /// Endpoint URLs, for diagnostics.
    urls: Vec<String>,
    /// List of providers (primary + failovers).
    providers: Vec<Arc<dyn Provider + Send + Sync>>,
    /// Request timeout duration.
    timeout_duration: Duration,
    gas_price_bump_percent: u64,
}

impl RpcChainClient {
    /// Select the network described by `config`.
    ///
    /// Only builds the HTTP providers; nothing is sent until the first call.
    pub fn new(config: &ChainConfig) -> BlockchainResult<Self> {
        let urls = config.rpc_urls().to_vec();
        if urls.is_empty() {
            return Err(BlockchainError::InvalidRpcUrl {
                url: String::new(),
                reason: format!("no endpoints configured for {}", config.network),
            });
        }

        let mut providers = Vec::with_capacity(urls.len());
        for url_str in &urls {
            let url: url::Url = url_str.parse().map_err(|e: url::ParseError| {
                BlockchainError::InvalidRpcUrl {
                    url: url_str.clone(),
                    reason: e.to_string(),
                }
            })?;
            providers.push(
                Arc::new(ProviderBuilder::new().connect_http(url)) as Arc<dyn Provider + Send + Sync>
            );
        }

        tracing::debug!(
            network = %config.network,
            endpoints = urls.len(),
            timeout_secs = config.rpc_timeout_secs,
            "Chain client configured"
        );

        Ok(Self {
            network: config.network,
            urls,
            providers,
            timeout_duration: Duration::from_secs(config.rpc_timeout_secs),
            gas_price_bump_percent: config.gas_price_bump_percent,
        })
    }

    /// Run a read against each endpoint in turn until one answers.
    ///
    /// A JSON-RPC error response is the node's verdict on the request and is
    /// returned through `rejected` without trying further endpoints. If every
    /// endpoint timed out the result is `Timeout`, otherwise `Network`.
    async fn read<T, F, Fut>(
        &self,
        what: &str,
        call: F,
        rejected: fn(String) -> BlockchainError,
    ) -> BlockchainResult<T>
    where
        F: Fn(Arc<dyn Provider + Send + Sync>) -> Fut + Send + Sync,
        Fut: Future<Output = TransportResult<T>> + Send,
        T: Send,
    {
        let mut last_error = String::new();
        let mut timeouts = 0;
        for (i, provider) in self.providers.iter().enumerate() {
            match timeout(self.timeout_duration, call(Arc::clone(provider))).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) if e.as_error_resp().is_some() => {
                    tracing::warn!(provider_idx = i, error = %e, "Node rejected {}", what);
                    return Err(rejected(e.to_string()));
                }
                Ok(Err(e)) => {
                    tracing::warn!(provider_idx = i, error = %e, "RPC error, trying next provider");
                    last_error = e.to_string();
                }
                Err(_) => {
                    tracing::warn!(provider_idx = i, "RPC timeout, trying next provider");
                    timeouts += 1;
                }
            }
        }
        if timeouts == self.providers.len() {
            return Err(BlockchainError::Timeout(self.timeout_duration.as_secs()));
        }
        Err(BlockchainError::Network(format!(
            "all {} {} endpoints failed to {}: {}",
            self.providers.len(),
            self.network,
            what,
            last_error
        )))
    }

    fn bump_gas_price(&self, quoted: u128) -> u128 {
        quoted.saturating_add(quoted.saturating_mul(u128::from(self.gas_price_bump_percent)) / 100)
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    fn network(&self) -> Network {
        self.network
    }

    async fn get_chain_id(&self) -> BlockchainResult<ChainId> {
        self.read(
            "get chain id",
            |p| async move { p.get_chain_id().await },
            BlockchainError::Network,
        )
        .await
        .map(ChainId)
    }

    async fn get_balance(&self, address: Address) -> BlockchainResult<U256> {
        self.read(
            "get balance",
            move |p| async move { p.get_balance(address).await },
            BlockchainError::Network,
        )
        .await
    }

    async fn get_nonce(&self, address: Address) -> BlockchainResult<u64> {
        self.read(
            "get transaction count",
            move |p| async move { p.get_transaction_count(address).await },
            BlockchainError::Network,
        )
        .await
    }

    async fn estimate_gas(
        &self,
        from: Address,
        to: Address,
        value: U256,
    ) -> BlockchainResult<GasEstimate> {
        let request = TransactionRequest::default()
            .with_from(from)
            .with_to(to)
            .with_value(value);

        let gas_limit = self
            .read(
                "estimate gas",
                |p| {
                    let request = request.clone();
                    async move { p.estimate_gas(request).await }
                },
                BlockchainError::GasEstimation,
            )
            .await?;

        let quoted = self
            .read(
                "get gas price",
                |p| async move { p.get_gas_price().await },
                BlockchainError::GasEstimation,
            )
            .await?;

        Ok(GasEstimate {
            gas_limit,
            gas_price: self.bump_gas_price(quoted),
        })
    }

    async fn broadcast(&self, tx: &SignedTransaction) -> BlockchainResult<TxHash> {
        let provider = self
            .providers
            .first()
            .ok_or_else(|| BlockchainError::Broadcast("no endpoint configured".to_string()))?;

        match timeout(self.timeout_duration, provider.send_raw_transaction(&tx.raw[..])).await {
            Ok(Ok(pending)) => {
                let hash = *pending.tx_hash();
                tracing::info!(tx_hash = %hash, nonce = tx.nonce, "Transaction broadcast");
                Ok(hash)
            }
            Ok(Err(e)) => Err(BlockchainError::Broadcast(e.to_string())),
            Err(_) => Err(BlockchainError::Broadcast(format!(
                "no response within {}s; the node may still have accepted {}",
                self.timeout_duration.as_secs(),
                tx.hash
            ))),
        }
    }
}

impl std::fmt::Debug for RpcChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcChainClient")
            .field("network", &self.network)
            .field("urls", &self.urls)
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}

/// Delegates reads to `inner` and fabricates broadcasts.
///
/// The fabricated hash is the signed transaction's own keccak hash, so it is
/// exactly what a live broadcast would have reported.
#[derive(Debug, Clone)]
pub struct MockBroadcast<C> {
    inner: C,
}

impl<C: ChainClient> MockBroadcast<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C: ChainClient> ChainClient for MockBroadcast<C> {
    fn network(&self) -> Network {
        self.inner.network()
    }

    fn is_simulated(&self) -> bool {
        true
    }

    async fn get_chain_id(&self) -> BlockchainResult<ChainId> {
        self.inner.get_chain_id().await
    }

    async fn get_balance(&self, address: Address) -> BlockchainResult<U256> {
        self.inner.get_balance(address).await
    }

    async fn get_nonce(&self, address: Address) -> BlockchainResult<u64> {
        self.inner.get_nonce(address).await
    }

    async fn estimate_gas(
        &self,
        from: Address,
        to: Address,
        value: U256,
    ) -> BlockchainResult<GasEstimate> {
        self.inner.estimate_gas(from, to, value).await
    }

    async fn broadcast(&self, tx: &SignedTransaction) -> BlockchainResult<TxHash> {
        tracing::warn!(
            tx_hash = %tx.hash,
            to = %tx.to,
            nonce = tx.nonce,
            "Mock mode: broadcast skipped"
        );
        Ok(tx.hash)
    }
}
