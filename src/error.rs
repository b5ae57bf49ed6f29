use crate::commands::USAGE;
use crate::network::nftables::EngineError;
use crate::network::types::ValidationError;
use crate::settings::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IplimitsError {
    /// Wrong or missing command; the message ends with the usage text
    #[error("{0}")]
    Usage(String),

    /// Malformed `add` arguments
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// nft could not be run or exited non-zero
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Unreadable or invalid configuration file
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Error when the logger cannot be installed
    #[error("failed to initialize logger: {0}")]
    Logger(String),

    /// I/O errors writing dry-run output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenient Result type alias using `IplimitsError`.
pub type Result<T> = std::result::Result<T, IplimitsError>;

impl IplimitsError {
    /// Creates a usage error with the usage text appended.
    pub fn usage(reason: impl std::fmt::Display) -> Self {
        Self::Usage(format!("{}\n{}", reason, USAGE))
    }
}
