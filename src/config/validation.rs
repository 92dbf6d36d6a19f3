//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, ports valid)
//! - Reject page extensions the resolver cannot tell apart
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::AppConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("pages.extensions must not be empty")]
    NoExtensions,

    #[error("page extension {0:?} must be non-empty and without a leading dot")]
    InvalidExtension(String),

    #[error("page extension {0:?} is listed more than once")]
    DuplicateExtension(String),

    #[error("pages.output_extension must not be empty")]
    NoOutputExtension,

    #[error("server.port must be non-zero")]
    ZeroPort,

    #[error("timeouts.request_secs must be non-zero")]
    ZeroTimeout,

    #[error("observability.metrics_address {0:?} is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.pages.extensions.is_empty() {
        errors.push(ValidationError::NoExtensions);
    }
    let mut seen = HashSet::new();
    for ext in &config.pages.extensions {
        if ext.is_empty() || ext.starts_with('.') {
            errors.push(ValidationError::InvalidExtension(ext.clone()));
        } else if !seen.insert(ext.as_str()) {
            errors.push(ValidationError::DuplicateExtension(ext.clone()));
        }
    }

    if config.pages.output_extension.is_empty() {
        errors.push(ValidationError::NoOutputExtension);
    }
    if config.server.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
