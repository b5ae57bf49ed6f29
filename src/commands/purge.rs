//! The `purge` command: delete every limit added by this tool.

use crate::error::Result;
use crate::network::nftables::{purge_args, Enforcer, FilterEngine};
use log::info;
use std::io::Write;

/// Deletes the limits table, removing all limits at once
///
/// With `dry_run`, writes the nft command line to `out` instead.
pub fn purge_limits<E, W>(enforcer: &Enforcer<E>, dry_run: bool, out: &mut W) -> Result<()>
where
    E: FilterEngine,
    W: Write,
{
    if dry_run {
        writeln!(
            out,
            "{} {}",
            enforcer.engine().program(),
            purge_args().join(" ")
        )?;
        return Ok(());
    }

    enforcer.purge()?;
    info!("All limits purged");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IplimitsError;
    use crate::network::nftables::FakeEngine;

    #[test]
    fn test_purge_without_table_surfaces_engine_error() {
        let enforcer = Enforcer::new(FakeEngine::replying(
            1,
            "Error: No such file or directory\ndelete table akavel_iplimits\n",
        ));
        let mut out = Vec::new();

        let err = purge_limits(&enforcer, false, &mut out).unwrap_err();
        assert!(matches!(err, IplimitsError::Engine(_)));
        assert!(err.to_string().starts_with("purging limits failed: "));
    }

    #[test]
    fn test_dry_run_prints_command() {
        let enforcer = Enforcer::new(FakeEngine::replying(0, ""));
        let mut out = Vec::new();

        purge_limits(&enforcer, true, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "nft delete table akavel_iplimits\n"
        );
        assert!(enforcer.engine().calls.borrow().is_empty());
    }
}
