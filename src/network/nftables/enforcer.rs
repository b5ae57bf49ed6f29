//! Applies and purges limits by running the `nft` command.

use crate::network::nftables::ruleset::TABLE_NAME;
use crate::utils::output_details;
use log::{debug, info};
use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use thiserror::Error;

/// Program name used when no other engine is configured.
pub const DEFAULT_PROGRAM: &str = "nft";

/// What the enforcer was doing when the engine failed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EngineAction {
    SetLimit,
    Purge,
}

impl fmt::Display for EngineAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineAction::SetLimit => f.write_str("setting limit"),
            EngineAction::Purge => f.write_str("purging limits"),
        }
    }
}

/// Errors from running the filter engine
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{action} failed: error running {program}: {source}")]
    Spawn {
        action: EngineAction,
        program: String,
        source: io::Error,
    },

    #[error(
        "{action} failed: error running {program}: {}{}",
        exit_description(.code),
        output_details(.output)
    )]
    Failed {
        action: EngineAction,
        program: String,
        code: Option<i32>,
        output: String,
    },
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// Result of one engine process run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EngineOutput {
    /// Exit code, `None` if the process was killed by a signal
    pub code: Option<i32>,
    /// Standard output followed by standard error
    pub output: String,
}

impl EngineOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// The external packet filter control program.
///
/// Implemented by [`Nft`] for the real command; tests substitute a
/// recording double.
pub trait FilterEngine {
    /// Returns the program name, used in diagnostics
    fn program(&self) -> &str;

    /// Runs the engine once with `args`, feeding `stdin` if given, and
    /// blocks until it exits.
    fn execute(&self, args: &[&str], stdin: Option<&str>) -> io::Result<EngineOutput>;
}

/// Runs the `nft` binary (or a configured replacement) as a child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nft {
    program: PathBuf,
    display_name: String,
}

impl Nft {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        let program = program.into();
        let display_name = program.display().to_string();
        Self {
            program,
            display_name,
        }
    }
}

impl Default for Nft {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl FilterEngine for Nft {
    fn program(&self) -> &str {
        &self.display_name
    }

    fn execute(&self, args: &[&str], stdin: Option<&str>) -> io::Result<EngineOutput> {
        debug!("nft: running {} {}", self.display_name, args.join(" "));

        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let (Some(input), Some(mut pipe)) = (stdin, child.stdin.take()) {
            match pipe.write_all(input.as_bytes()) {
                // the engine quit without reading; its exit status says why
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                    debug!("nft: stdin closed early: {}", e);
                }
                result => result?,
            }
            // dropping the pipe closes it so the engine sees EOF
        }

        let output = child.wait_with_output()?;
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        debug!("nft: exited with {:?}", output.status.code());

        Ok(EngineOutput {
            code: output.status.code(),
            output: combined,
        })
    }
}

/// Submits rule sets to, and deletes the limits table from, a [`FilterEngine`].
///
/// Each call maps to exactly one engine run. Failures are returned once,
/// never retried.
pub struct Enforcer<E: FilterEngine> {
    engine: E,
}

impl<E: FilterEngine> Enforcer<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Loads `ruleset` into the engine with `nft -f -`.
    pub fn apply(&self, ruleset: &str) -> Result<(), EngineError> {
        self.run(EngineAction::SetLimit, &["-f", "-"], Some(ruleset))?;
        info!("nft: rule set loaded into table {}", TABLE_NAME);
        Ok(())
    }

    /// Deletes the whole limits table.
    ///
    /// A missing table is reported as the engine reports it.
    pub fn purge(&self) -> Result<(), EngineError> {
        self.run(EngineAction::Purge, &purge_args(), None)?;
        info!("nft: table {} deleted", TABLE_NAME);
        Ok(())
    }

    fn run(&self, action: EngineAction, args: &[&str], stdin: Option<&str>) -> Result<(), EngineError> {
        let program = self.engine.program().to_string();

        let output = self
            .engine
            .execute(args, stdin)
            .map_err(|source| EngineError::Spawn {
                action,
                program: program.clone(),
                source,
            })?;

        if !output.success() {
            return Err(EngineError::Failed {
                action,
                program,
                code: output.code,
                output: output.output,
            });
        }

        Ok(())
    }
}

/// Arguments of the purge invocation, `delete table <TABLE_NAME>`.
pub fn purge_args() -> [&'static str; 3] {
    ["delete", "table", TABLE_NAME]
}
