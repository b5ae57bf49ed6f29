use crate::commands::Command;
use crate::error::IplimitsError;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Command-line interface of `iplimits`
///
/// Must run as root, with `nft` available in PATH.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "iplimits", version, about = "Manage per-IP transfer rate limits in nftables")]
pub struct Cli {
    /// TOML configuration file (default: <config dir>/iplimits/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// nft executable to run, overriding the configuration
    #[arg(long, global = true, value_name = "PATH")]
    pub nft: Option<PathBuf>,

    /// Print the rule set or nft command instead of running it
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Log to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Turns a clap parse failure into a usage error.
///
/// Keeps clap's one-line reason and replaces its own usage hint with the
/// tool's usage text.
pub fn usage_error(err: &clap::Error) -> IplimitsError {
    let rendered = err.render().to_string();
    let reason = rendered
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ")
        .to_string();
    IplimitsError::usage(reason)
}
