//! The `add` command: validate, render, load.

use crate::error::Result;
use crate::network::nftables::{render, Enforcer, FilterEngine, TABLE_NAME};
use crate::network::types::LimitSpec;
use log::info;
use std::io::Write;

/// Adds a download and upload limit for one IPv4 address
///
/// # Arguments
///
/// * `args` - Raw `IP LIMIT UNIT` arguments; extras are ignored
/// * `enforcer` - Engine wrapper the rule set is loaded through
/// * `dry_run` - Write the rule set to `out` instead of loading it
/// * `out` - Destination for dry-run output
pub fn add_limit<E, W>(
    args: &[String],
    enforcer: &Enforcer<E>,
    dry_run: bool,
    out: &mut W,
) -> Result<()>
where
    E: FilterEngine,
    W: Write,
{
    let spec = LimitSpec::from_args(args)?;
    let ruleset = render(&spec, TABLE_NAME);

    if dry_run {
        out.write_all(ruleset.as_bytes())?;
        return Ok(());
    }

    enforcer.apply(&ruleset)?;
    info!(
        "Limited {} to {} in both directions",
        spec.address,
        spec.rate_expression()
    );
    Ok(())
}
