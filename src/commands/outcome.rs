use std::fmt;

use alloy::primitives::{Address, TxHash};

use crate::blockchain::{EthAmount, Network};

/// What a successful command reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    WalletAdded {
        name: String,
        address: Address,
    },
    Balance {
        wallet: String,
        address: Address,
        network: Network,
        balance: EthAmount,
    },
    Sent {
        from: Address,
        to: Address,
        amount: EthAmount,
        tx_hash: TxHash,
        network: Network,
        /// Broadcast was fabricated.
        simulated: bool,
    },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::WalletAdded { name, address } => {
                writeln!(f, "Wallet '{}' added successfully", name)?;
                write!(f, "Address: {}", address)
            }
            Outcome::Balance {
                address,
                network,
                balance,
                ..
            } => write!(f, "Balance for {} on {}: {} ETH", address, network, balance),
            Outcome::Sent {
                from,
                to,
                amount,
                tx_hash,
                network,
                simulated,
            } => {
                if *simulated {
                    writeln!(f, "Transaction simulated (mock mode, not broadcast)")?;
                } else {
                    writeln!(f, "Transaction sent")?;
                }
                writeln!(f, "Network: {}", network)?;
                writeln!(f, "From: {}", from)?;
                writeln!(f, "To: {}", to)?;
                writeln!(f, "Amount: {} ETH", amount)?;
                write!(f, "TX Hash: {}", tx_hash)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sent_display_marks_mock() {
        let outcome = Outcome::Sent {
            from: Address::ZERO,
            to: Address::repeat_byte(1),
            amount: "1.0".parse().unwrap(),
            tx_hash: TxHash::repeat_byte(0xab),
            network: Network::Sepolia,
            simulated: true,
        };
        let text = outcome.to_string();
        assert!(text.starts_with("Transaction simulated"));
        assert!(text.contains("Amount: 1 ETH"));
        assert!(text.contains(&format!("TX Hash: 0x{}", "ab".repeat(32))));
    }

    #[test]
    fn test_balance_display() {
        let outcome = Outcome::Balance {
            wallet: "w".into(),
            address: Address::ZERO,
            network: Network::Mainnet,
            balance: "0.25".parse().unwrap(),
        };
        assert_eq!(
            outcome.to_string(),
            format!("Balance for {} on mainnet: 0.25 ETH", Address::ZERO)
        );
    }
}
