//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the selected network has usable endpoints
//! - Validate value ranges (timeouts > 0, bump percent bounded)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use crate::config::schema::AppConfig;

/// Upper bound for `gas_price_bump_percent`.
pub const MAX_GAS_PRICE_BUMP_PERCENT: u64 = 100;

/// One failed check, naming the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check an assembled configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.state_file.as_os_str().is_empty() {
        errors.push(ValidationError::new("state_file", "must not be empty"));
    }

    let chain = &config.chain;
    if chain.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "chain.rpc_timeout_secs",
            "must be greater than 0",
        ));
    }
    if chain.gas_price_bump_percent > MAX_GAS_PRICE_BUMP_PERCENT {
        errors.push(ValidationError::new(
            "chain.gas_price_bump_percent",
            format!("must be at most {}", MAX_GAS_PRICE_BUMP_PERCENT),
        ));
    }

    let field = format!("chain.endpoints.{}", chain.network);
    let urls = chain.rpc_urls();
    if urls.is_empty() {
        errors.push(ValidationError::new(
            field.clone(),
            "at least one RPC endpoint is required",
        ));
    }
    for raw in urls {
        match url::Url::parse(raw) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            Ok(parsed) => errors.push(ValidationError::new(
                field.clone(),
                format!("'{}' uses unsupported scheme '{}'", raw, parsed.scheme()),
            )),
            Err(e) => errors.push(ValidationError::new(
                field.clone(),
                format!("'{}' is not a valid URL: {}", raw, e),
            )),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
