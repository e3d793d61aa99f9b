//! JSON-backed wallet store.
//!
//! # Responsibilities
//! - Load the wallet document and validate every entry
//! - Add wallets with duplicate and key checks
//! - Rewrite the whole document atomically on every change
//!
//! # On-disk format
//! ```json
//! { "wallets": { "<name>": { "private_key": "<64 hex>", "address": "0x..." } } }
//! ```
//! `address` is optional on read (older files only carry the key) and is
//! always written.

use std::collections::BTreeMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use alloy::primitives::Address;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::blockchain::wallet::Wallet;
use crate::store::error::{StoreError, StoreResult};

#[derive(Default, Serialize, Deserialize)]
struct StateDocument {
    #[serde(default)]
    wallets: BTreeMap<String, WalletRecord>,
}

#[derive(Serialize, Deserialize)]
struct WalletRecord {
    private_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    address: Option<Address>,
}

/// Name → wallet mapping persisted at `path`.
#[derive(Debug)]
pub struct WalletStore {
    path: PathBuf,
    wallets: BTreeMap<String, Wallet>,
}

impl WalletStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        let document = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str::<StateDocument>(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StateDocument::default(),
            Err(e) => return Err(e.into()),
        };

        let mut wallets = BTreeMap::new();
        for (name, record) in document.wallets {
            let wallet =
                Wallet::from_private_key(&name, &record.private_key).map_err(|e| {
                    StoreError::Corrupt {
                        name: name.clone(),
                        reason: e.to_string(),
                    }
                })?;

            if let Some(stored) = record.address {
                if stored != wallet.address() {
                    return Err(StoreError::Corrupt {
                        name,
                        reason: format!(
                            "stored address {} does not match key-derived address {}",
                            stored,
                            wallet.address()
                        ),
                    });
                }
            }
            wallets.insert(name, wallet);
        }

        tracing::debug!(path = %path.display(), wallets = wallets.len(), "Wallet state loaded");
        Ok(Self { path, wallets })
    }

    /// Add a wallet and persist the store.
    ///
    /// Nothing changes, in memory or on disk, unless the write succeeds.
    pub fn add(&mut self, name: &str, private_key: &str) -> StoreResult<Wallet> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::InvalidName("name must not be empty".to_string()));
        }
        if self.wallets.contains_key(name) {
            return Err(StoreError::DuplicateWallet(name.to_string()));
        }

        let wallet = Wallet::from_private_key(name, private_key)?;

        let mut next = self.wallets.clone();
        next.insert(name.to_string(), wallet.clone());
        write_atomically(&self.path, &next)?;
        self.wallets = next;

        tracing::info!(wallet = %name, address = %wallet.address(), "Wallet added");
        Ok(wallet)
    }

    /// Names are matched after trimming, the same way `add` stores them.
    pub fn get(&self, name: &str) -> StoreResult<Wallet> {
        self.lookup(name).cloned()
    }

    /// Address to query balances for. No side effects.
    pub fn balance_lookup_key(&self, name: &str) -> StoreResult<Address> {
        self.lookup(name).map(Wallet::address)
    }

    fn lookup(&self, name: &str) -> StoreResult<&Wallet> {
        let name = name.trim();
        self.wallets
            .get(name)
            .ok_or_else(|| StoreError::WalletNotFound(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.wallets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.wallets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wallets.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Serialize `wallets` into a temp file beside `path`, fsync it, then rename
/// it over `path`.
fn write_atomically(path: &Path, wallets: &BTreeMap<String, Wallet>) -> StoreResult<()> {
    let document = StateDocument {
        wallets: wallets
            .iter()
            .map(|(name, wallet)| {
                let record = WalletRecord {
                    private_key: wallet.private_key().expose_secret().to_string(),
                    address: Some(wallet.address()),
                };
                (name.clone(), record)
            })
            .collect(),
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut temp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, &document)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| StoreError::Io(e.error))?;

    // Make the rename itself durable.
    #[cfg(unix)]
    fs::File::open(dir)?.sync_all()?;

    tracing::debug!(path = %path.display(), wallets = wallets.len(), "Wallet state written");
    Ok(())
}
