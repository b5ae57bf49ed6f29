//! Network limiting functionality.
//!
//! This module contains the limit types parsed from operator input and
//! the nftables backend that enforces them.

pub mod nftables;
pub mod types;
