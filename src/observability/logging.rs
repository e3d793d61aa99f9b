//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Configure log level from config, `RUST_LOG` or `--verbose`
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Events go to stderr; stdout carries only command output
//! - `RUST_LOG` beats `--verbose`, which beats `logging.level`

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Directive used by `--verbose`.
pub const VERBOSE_DIRECTIVE: &str = "flash_tx=debug";

/// Pick the filter directive when `RUST_LOG` is not set.
pub fn default_directive(config: &LoggingConfig, verbose: bool) -> &str {
    if verbose {
        VERBOSE_DIRECTIVE
    } else {
        &config.level
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init_logging(config: &LoggingConfig, verbose: bool) {
    let directive = default_directive(config, verbose);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive))
        .unwrap_or_else(|_| EnvFilter::new("flash_tx=info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
