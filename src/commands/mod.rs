//! Command handlers.
//!
//! Routes the parsed subcommand to its handler. Handlers return errors
//! instead of printing them; `main` owns diagnostics and the exit code.

pub mod add;
pub mod purge;

use crate::error::{IplimitsError, Result};
use crate::network::nftables::{Enforcer, FilterEngine};
use clap::Subcommand;
use std::io::Write;

/// Usage text appended to every usage and argument-count error.
pub const USAGE: &str = "Usage:
	iplimits purge
		Clears all limits previously added by iplimits.
	iplimits add IP LIMIT pps|bps|kbps|mbps
		Adds a new download & upload LIMIT for given IP.
		The IP must be in IPv4 format.
		The LIMIT must be an unsigned 32 bit value.
		The limit must be followed by one of the following units:
			pps = packets per second
			bps = bytes per second
			kbps = kilobytes per second
			mbps = megabytes per second
";

/// Subcommands accepted by `iplimits`
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Clear all limits previously added by iplimits
    Purge,

    /// Add a download & upload LIMIT for an IPv4 address
    Add {
        /// IP LIMIT pps|bps|kbps|mbps
        #[arg(value_name = "IP LIMIT UNIT", num_args = 0.., allow_negative_numbers = true)]
        args: Vec<String>,
    },
}

/// Runs a single command.
///
/// # Arguments
///
/// * `command` - The parsed subcommand, `None` if none was given
/// * `dry_run` - Write what would be sent to nft to `out` instead of running it
/// * `enforcer` - Engine wrapper used for the actual change
/// * `out` - Destination for dry-run output
pub fn run<E, W>(
    command: Option<Command>,
    dry_run: bool,
    enforcer: &Enforcer<E>,
    out: &mut W,
) -> Result<()>
where
    E: FilterEngine,
    W: Write,
{
    match command {
        Some(Command::Purge) => purge::purge_limits(enforcer, dry_run, out),
        Some(Command::Add { args }) => add::add_limit(&args, enforcer, dry_run, out),
        None => Err(IplimitsError::usage("missing command")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::nftables::FakeEngine;

    #[test]
    fn test_missing_command() {
        let enforcer = Enforcer::new(FakeEngine::replying(0, ""));
        let mut out = Vec::new();

        let err = run(None, false, &enforcer, &mut out).unwrap_err();
        assert!(matches!(err, IplimitsError::Usage(_)));
        assert_eq!(err.to_string(), format!("missing command\n{}", USAGE));
        assert!(enforcer.engine().calls.borrow().is_empty());
    }

    #[test]
    fn test_routes_add() {
        let enforcer = Enforcer::new(FakeEngine::replying(0, ""));
        let mut out = Vec::new();
        let command = Command::Add {
            args: vec!["1.2.3.4".into(), "2".into(), "mbps".into()],
        };

        run(Some(command), false, &enforcer, &mut out).unwrap();
        assert_eq!(enforcer.engine().calls.borrow()[0].0, vec!["-f", "-"]);
        assert!(out.is_empty());
    }

    #[test]
    fn test_routes_purge() {
        let enforcer = Enforcer::new(FakeEngine::replying(0, ""));
        let mut out = Vec::new();

        run(Some(Command::Purge), false, &enforcer, &mut out).unwrap();
        assert_eq!(
            enforcer.engine().calls.borrow()[0].0,
            vec!["delete", "table", "akavel_iplimits"]
        );
    }
}
