//! Runs one parsed command against the wallet store and chain client.
//!
//! Each process handles a single command: it starts idle, enters the
//! `AddWallet`, `Balance` or `Send` state, and ends in success (an
//! [`Outcome`]) or failure (an [`Error`]). Nothing carries over to the next
//! invocation.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::blockchain::{parse_address, ChainClient, EthAmount, TxBuilder};
use crate::commands::outcome::Outcome;
use crate::error::Result;
use crate::store::WalletStore;

/// A transfer as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub from_wallet: String,
    pub to_address: String,
    pub amount_eth: String,
}

/// A parsed CLI verb.
pub enum Command {
    AddWallet { name: String, key: SecretString },
    Balance { wallet: String },
    Send(TransferRequest),
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::AddWallet { .. } => CommandKind::AddWallet,
            Command::Balance { .. } => CommandKind::Balance,
            Command::Send(_) => CommandKind::Send,
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::AddWallet { name, .. } => f
                .debug_struct("AddWallet")
                .field("name", name)
                .finish_non_exhaustive(),
            Command::Balance { wallet } => f.debug_struct("Balance").field("wallet", wallet).finish(),
            Command::Send(request) => f.debug_tuple("Send").field(request).finish(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    AddWallet,
    Balance,
    Send,
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CommandKind::AddWallet => "add-wallet",
            CommandKind::Balance => "balance",
            CommandKind::Send => "send",
        })
    }
}

pub struct Dispatcher {
    store: WalletStore,
    chain: Box<dyn ChainClient>,
}

impl Dispatcher {
    pub fn new(store: WalletStore, chain: Box<dyn ChainClient>) -> Self {
        Self { store, chain }
    }

    /// Run `command` to completion.
    pub async fn dispatch(&mut self, command: Command) -> Result<Outcome> {
        let kind = command.kind();
        tracing::debug!(command = %kind, "Command started");

        let result = match command {
            Command::AddWallet { name, key } => self.add_wallet(&name, &key),
            Command::Balance { wallet } => self.balance(&wallet).await,
            Command::Send(request) => self.send(&request).await,
        };

        match &result {
            Ok(_) => tracing::debug!(command = %kind, "Command succeeded"),
            Err(e) => tracing::debug!(command = %kind, error = %e, "Command failed"),
        }
        result
    }

    pub fn store(&self) -> &WalletStore {
        &self.store
    }

    fn add_wallet(&mut self, name: &str, key: &SecretString) -> Result<Outcome> {
        let wallet = self.store.add(name, key.expose_secret())?;
        Ok(Outcome::WalletAdded {
            name: wallet.name().to_string(),
            address: wallet.address(),
        })
    }

    async fn balance(&self, wallet: &str) -> Result<Outcome> {
        let address = self.store.balance_lookup_key(wallet)?;
        let balance = self.chain.get_balance(address).await?;
        Ok(Outcome::Balance {
            wallet: wallet.to_string(),
            address,
            network: self.chain.network(),
            balance: EthAmount::from_wei(balance),
        })
    }

    async fn send(&self, request: &TransferRequest) -> Result<Outcome> {
        let wallet = self.store.get(&request.from_wallet)?;
        let to = parse_address(&request.to_address)?;
        let amount: EthAmount = request.amount_eth.parse()?;
        if amount.is_zero() {
            return Err(crate::blockchain::BlockchainError::InvalidAmount {
                input: request.amount_eth.clone(),
                reason: "amount must be greater than zero".to_string(),
            }
            .into());
        }

        let signed = TxBuilder::new(self.chain.as_ref(), &wallet)
            .build(to, amount)
            .await?;
        let tx_hash = self.chain.broadcast(&signed).await?;

        Ok(Outcome::Sent {
            from: wallet.address(),
            to,
            amount,
            tx_hash,
            network: self.chain.network(),
            simulated: self.chain.is_simulated(),
        })
    }
}
