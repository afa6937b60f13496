//! Error types for error-model configuration loading and validation.

use std::path::PathBuf;

use thiserror::Error;
use validator::ValidationErrors;

/// Failures surfaced while loading or validating an error-model
/// configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("error-model configuration not found: {0}")]
    FileNotFound(PathBuf),

    /// The file or environment overrides could not be parsed.
    #[error("malformed error-model configuration: {0}")]
    Parse(#[from] figment::Error),

    /// The configuration parsed but violates a validation rule.
    #[error("invalid error-model configuration: {0}")]
    Invalid(#[from] ValidationErrors),
}
