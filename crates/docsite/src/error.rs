//! CLI error types.

use docsite_config::ConfigError;
use docsite_docs::ScanError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Scan(#[from] ScanError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize configuration: {0}")]
    Serialize(String),

    /// Violations were already reported; carries their count.
    #[error("check failed with {0} error(s)")]
    Validation(usize),
}
