//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields (address, nonce, tx_hash)
//!
//! Consumer:
//!     → logging.rs (fmt layer on stderr, filtered by EnvFilter)
//! ```
//!
//! # Design Decisions
//! - Key material never appears in any field
//! - Log output never mixes with command output on stdout

pub mod logging;
