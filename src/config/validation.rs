//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject duplicate or empty preferred wallet names
//! - Check feature identifiers have the `namespace:name` shape
//! - Validate value ranges (log level, chain ID)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: KitConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::KitConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic configuration problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("preferred wallet '{0}' is listed more than once")]
    DuplicatePreferredWallet(String),

    #[error("preferred wallet names must not be empty")]
    EmptyPreferredWallet,

    #[error("feature identifier '{0}' must have the form namespace:name")]
    InvalidFeature(String),

    #[error("unknown log level '{0}'")]
    InvalidLogLevel(String),

    #[error("burner chain_id must be non-zero")]
    InvalidBurnerChainId,
}

/// Validate a parsed configuration.
pub fn validate_config(config: &KitConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let mut seen = HashSet::new();
    for name in &config.provider.preferred_wallets {
        if name.trim().is_empty() {
            errors.push(ValidationError::EmptyPreferredWallet);
        } else if !seen.insert(name.as_str()) {
            errors.push(ValidationError::DuplicatePreferredWallet(name.clone()));
        }
    }

    for feature in &config.provider.required_features {
        if !feature.is_well_formed() {
            errors.push(ValidationError::InvalidFeature(feature.to_string()));
        }
    }

    let level = config.observability.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if config.provider.enable_unsafe_burner && config.provider.burner.chain_id == 0 {
        errors.push(ValidationError::InvalidBurnerChainId);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
