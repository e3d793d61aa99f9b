//! Configuration loading from disk and environment.

use std::fs;
use std::path::{Path, PathBuf};

use crate::blockchain::types::Network;
use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable naming a TOML config file.
pub const CONFIG_PATH_ENV_VAR: &str = "FLASH_CONFIG";
/// Overrides `chain.network`.
pub const NETWORK_ENV_VAR: &str = "FLASH_NETWORK";
/// Overrides `state_file`.
pub const STATE_FILE_ENV_VAR: &str = "FLASH_STATE_FILE";
/// Replaces the Sepolia endpoint list with a single URL.
pub const SEPOLIA_RPC_URL_ENV_VAR: &str = "SEPOLIA_RPC_URL";
/// Replaces the mainnet endpoint list with a single URL.
pub const MAINNET_RPC_URL_ENV_VAR: &str = "MAINNET_RPC_URL";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(toml::de::Error),
    Env { var: String, message: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "IO error reading {}: {}", path.display(), e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Env { var, message } => write!(f, "Invalid {}: {}", var, message),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Read a TOML file, or return defaults when no path is given.
///
/// Does not validate; overrides still have to be applied.
pub fn load_file(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(AppConfig::default());
    };

    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
    let config: AppConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    tracing::debug!(path = %path.display(), "Configuration file loaded");
    Ok(config)
}

/// Apply environment overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(NETWORK_ENV_VAR) {
        config.chain.network = raw.parse::<Network>().map_err(|message| ConfigError::Env {
            var: NETWORK_ENV_VAR.to_string(),
            message,
        })?;
    }

    if let Some(path) = lookup(STATE_FILE_ENV_VAR) {
        config.state_file = PathBuf::from(path);
    }

    for (var, network) in [
        (SEPOLIA_RPC_URL_ENV_VAR, Network::Sepolia),
        (MAINNET_RPC_URL_ENV_VAR, Network::Mainnet),
    ] {
        if let Some(url) = lookup(var) {
            tracing::debug!(network = %network, "Using {} for endpoints", var);
            config.chain.endpoints.set_for_network(network, vec![url]);
        }
    }

    Ok(())
}

/// Values given on the command line. They win over file and environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub network: Option<Network>,
    pub state_file: Option<PathBuf>,
    pub mock: bool,
}

impl Overrides {
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(network) = self.network {
            config.chain.network = network;
        }
        if let Some(path) = &self.state_file {
            config.state_file = path.clone();
        }
        config.chain.mock = self.mock;
    }
}

/// Load configuration from `path` (or `FLASH_CONFIG`), apply environment
/// and command-line overrides, then validate.
pub fn load_config(path: Option<&Path>, overrides: &Overrides) -> Result<AppConfig, ConfigError> {
    let env_path = std::env::var_os(CONFIG_PATH_ENV_VAR).map(PathBuf::from);
    let path = path.or(env_path.as_deref());

    let mut config = load_file(path)?;
    apply_env_overrides(&mut config, |var| std::env::var(var).ok())?;
    overrides.apply(&mut config);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_no_path_gives_defaults() {
        let config = load_file(None).unwrap();
        assert_eq!(config.chain.network, Network::Sepolia);
    }

    #[test]
    fn test_load_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "state_file = \"/tmp/wallets.json\"\n[chain]\nnetwork = \"mainnet\"").unwrap();

        let config = load_file(Some(file.path())).unwrap();
        assert_eq!(config.state_file, PathBuf::from("/tmp/wallets.json"));
        assert_eq!(config.chain.network, Network::Mainnet);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_file(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(..)));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[chain\nnetwork = ").unwrap();
        assert!(matches!(load_file(Some(file.path())), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_top_level_network_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "network = \"mainnet\"\nstate_file = \"w.json\"\n[chain]\nrpc_timeout_secs = 10"
        )
        .unwrap();
        assert!(matches!(load_file(Some(file.path())), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        apply_env_overrides(
            &mut config,
            lookup_from(&[
                (NETWORK_ENV_VAR, "mainnet"),
                (STATE_FILE_ENV_VAR, "other.json"),
                (MAINNET_RPC_URL_ENV_VAR, "http://127.0.0.1:8545"),
            ]),
        )
        .unwrap();

        assert_eq!(config.chain.network, Network::Mainnet);
        assert_eq!(config.state_file, PathBuf::from("other.json"));
        assert_eq!(config.chain.rpc_urls(), ["http://127.0.0.1:8545".to_string()]);
        assert_eq!(config.chain.endpoints.sepolia.len(), 3);
    }

    #[test]
    fn test_cli_overrides_win() {
        let mut config = AppConfig::default();
        apply_env_overrides(&mut config, lookup_from(&[(NETWORK_ENV_VAR, "mainnet")])).unwrap();

        let overrides = Overrides {
            network: Some(Network::Sepolia),
            state_file: Some(PathBuf::from("cli.json")),
            mock: true,
        };
        overrides.apply(&mut config);

        assert_eq!(config.chain.network, Network::Sepolia);
        assert_eq!(config.state_file, PathBuf::from("cli.json"));
        assert!(config.chain.mock);
    }

    #[test]
    fn test_bad_network_env() {
        let mut config = AppConfig::default();
        let err = apply_env_overrides(&mut config, lookup_from(&[(NETWORK_ENV_VAR, "ropsten")]))
            .unwrap_err();
        assert!(err.to_string().contains("FLASH_NETWORK"));
    }

    #[test]
    fn test_validation_error_display_lists_all() {
        let err = ConfigError::Validation(vec![
            ValidationError {
                field: "a".into(),
                message: "x".into(),
            },
            ValidationError {
                field: "b".into(),
                message: "y".into(),
            },
        ]);
        assert_eq!(err.to_string(), "Validation failed: a: x, b: y");
    }
}
