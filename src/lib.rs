//! # iplimits - per-IP transfer rate limits for nftables
//!
//! iplimits is a small front end for the `nft` command. It adds a
//! download and upload rate limit for an IPv4 address, and purges every
//! limit it added earlier.
//!
//! ## Requirements
//!
//! * It must run with root privileges.
//! * The `nft` tool must be installed and available in `$PATH`.
//!
//! ## Architecture
//!
//! * `network::types` validates `IP LIMIT UNIT` into a [`LimitSpec`](network::types::LimitSpec)
//! * `network::nftables` renders the rule set and runs `nft`
//! * `commands` routes `add` and `purge`
//! * `settings` holds the CLI and the optional config file
//!
//! All limits live in one nftables table, [`TABLE_NAME`](network::nftables::TABLE_NAME).
//! `purge` deletes that table as a whole.
//!
//! ## Quick Start
//!
//! ```rust
//! use iplimits::prelude::*;
//!
//! let spec = LimitSpec::from_args(&["1.2.3.4", "2", "mbps"]).unwrap();
//! let ruleset = render(&spec, TABLE_NAME);
//! assert!(ruleset.contains("ip daddr 1.2.3.4 limit rate over 2 mbytes/second drop"));
//! ```

/// Command handlers and dispatch
pub mod commands;
/// Centralized error handling
pub mod error;
/// Limit types and the nftables backend
pub mod network;
/// Prelude for convenient imports
pub mod prelude;
/// Command-line and configuration file settings
pub mod settings;
/// Shared utility functions
pub mod utils;

// Re-export commonly used types
pub use error::{IplimitsError, Result};
