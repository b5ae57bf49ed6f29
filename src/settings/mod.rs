//! Settings for the `iplimits` command.
//!
//! This module contains the command-line definition and the optional
//! TOML configuration file.
//!
//! # Example
//!
//! ```rust
//! use iplimits::settings::Config;
//!
//! let config = Config::default();
//! assert_eq!(config.nft.to_str(), Some("nft"));
//! ```

pub mod cli;
pub mod config;

// Re-export commonly used types
pub use cli::{usage_error, Cli};
pub use config::{default_config_path, Config, ConfigError};
