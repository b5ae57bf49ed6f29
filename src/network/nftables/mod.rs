//! nftables backend for per-IP rate limits
//!
//! Renders limit tables in the nft configuration language and loads or
//! deletes them through the `nft` command.

mod enforcer;
mod ruleset;

pub use enforcer::{
    purge_args, EngineAction, EngineError, EngineOutput, Enforcer, FilterEngine, Nft,
    DEFAULT_PROGRAM,
};
pub use ruleset::{render, Chain, Direction, Hook, LimitRule, Table, TABLE_FAMILY, TABLE_NAME};

#[cfg(test)]
pub(crate) use enforcer::tests::FakeEngine;
