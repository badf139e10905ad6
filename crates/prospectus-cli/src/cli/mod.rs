//! CLI module for prospectus
//!
//! Wires parsed arguments to discovery, execution and rendering.

pub mod commands;
pub mod output;

pub use commands::{ProspectusCli, ProspectusCommands};
pub use output::OutputFormat;

use prospectus_core::{Loader, LoaderConfig};
use std::io;

use crate::error::CliError;

/// Exit codes for CLI operations
///
/// Drift is a normal outcome and exits with `Success`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// The report was produced
    Success = 0,
    /// Discovery failed: bad path, missing directory or failing `load`
    DiscoveryError = 3,
    /// Internal error
    InternalError = 10,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

/// Run the CLI with the given arguments and return the exit code
pub fn run(cli: ProspectusCli) -> Result<ExitCode, CliError> {
    let config = LoaderConfig::new().with_discovery_dir(cli.discovery_dir);
    let loader = Loader::new().with_config(config);
    let mut stdout = io::stdout().lock();

    match cli.command {
        ProspectusCommands::Check { dirs, all, json } => commands::execute_check(
            &loader,
            &dirs,
            all,
            OutputFormat::from_json_flag(json),
            &mut stdout,
        ),
        ProspectusCommands::Fix { dirs, json } => commands::execute_fix(
            &loader,
            &dirs,
            OutputFormat::from_json_flag(json),
            &mut stdout,
        ),
        ProspectusCommands::List { dirs, json } => commands::execute_list(
            &loader,
            &dirs,
            OutputFormat::from_json_flag(json),
            &mut stdout,
        ),
    }
}
