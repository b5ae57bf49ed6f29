//! Prelude module for convenient imports.
//!
//! This module re-exports commonly used types and traits from the crate,
//! allowing users to import everything they need with a single use statement:
//!
//! ```rust
//! use iplimits::prelude::*;
//! ```

// Error handling
pub use crate::error::{IplimitsError, Result};

// Limit types
pub use crate::network::types::{LimitSpec, RateUnit, ValidationError};

// nftables backend
pub use crate::network::nftables::{
    render, EngineError, EngineOutput, Enforcer, FilterEngine, Nft, TABLE_NAME,
};

// Settings
pub use crate::settings::{Cli, Config};

// Commands
pub use crate::commands::{run, Command};
