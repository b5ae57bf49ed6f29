#![warn(clippy::all)]

// main entry point
use clap::error::ErrorKind;
use clap::Parser;
use iplimits::commands;
use iplimits::network::nftables::{Enforcer, Nft};
use iplimits::settings::{usage_error, Cli, Config};
use iplimits::{IplimitsError, Result};
use log::{debug, LevelFilter};
use std::io::{self, Write};
use std::process::ExitCode;

// Simple stderr logger implementation
struct SimpleLogger;

impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let mut stderr = io::stderr().lock();
            let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
            // a logger has nowhere to report its own write failures
            let _ = writeln!(
                stderr,
                "[{}] {} - {}: {}",
                timestamp,
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

static LOGGER: SimpleLogger = SimpleLogger;

/// Initialize the application logger
///
/// Sets up the SimpleLogger with the given level filtering
fn init_logger(level: LevelFilter) -> Result<()> {
    log::set_logger(&LOGGER)
        .map(|()| log::set_max_level(level))
        .map_err(|e| IplimitsError::Logger(e.to_string()))
}

/// Loads settings, then runs the requested command against nft
fn execute(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    init_logger(config.level_filter(cli.verbose)?)?;

    let program = cli.nft.unwrap_or(config.nft);
    debug!("Using nft program {}", program.display());

    let enforcer = Enforcer::new(Nft::new(program));
    let mut stdout = io::stdout().lock();
    commands::run(cli.command, cli.dry_run, &enforcer, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

/// Writes the diagnostic for a failed run
fn report(err: &IplimitsError) -> ExitCode {
    eprintln!("error: {}", err);
    ExitCode::FAILURE
}

/// Main entry point for iplimits
///
/// This is the only place that prints errors or picks the exit code.
fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => return report(&usage_error(&e)),
    };

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}
