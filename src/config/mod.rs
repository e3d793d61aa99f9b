//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (FLASH_*, *_RPC_URL)
//!     → command-line overrides (--network, --mock, --state-file)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable for the rest of the process)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow running with no file at all
//! - The mock flag and network travel inside `ChainConfig`; nothing is global
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError, Overrides};
pub use schema::{AppConfig, ChainConfig, EndpointsConfig, LoggingConfig};
