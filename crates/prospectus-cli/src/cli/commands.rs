//! CLI command definitions for prospectus
//!
//! Provides Clap-based commands for checking directories for drift, fixing
//! drifted checks and listing what discovery finds.

use clap::{Parser, Subcommand};
use prospectus_core::{Loader, Protocol, DEFAULT_DISCOVERY_DIR};
use std::io::Write;
use std::path::PathBuf;

use super::output::{emit, render_checks, render_results, OutputFormat};
use super::ExitCode;
use crate::error::CliError;

/// Prospectus CLI
///
/// Discover checks from `.prospectus.d` directories and report where the
/// actual state has drifted from what each check expects.
#[derive(Parser, Debug)]
#[command(name = "prospectus")]
#[command(about = "Detect drift between expected and actual state", long_about = None)]
#[command(version)]
pub struct ProspectusCli {
    /// Log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Name of the subdirectory holding check programs
    #[arg(
        long,
        global = true,
        env = "PROSPECTUS_DISCOVERY_DIR",
        default_value = DEFAULT_DISCOVERY_DIR
    )]
    pub discovery_dir: String,

    #[command(subcommand)]
    pub command: ProspectusCommands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum ProspectusCommands {
    /// Check for state changes
    Check {
        /// Directories to check
        #[arg(default_value = ".")]
        dirs: Vec<PathBuf>,

        /// Show all items, regardless of state
        #[arg(short, long)]
        all: bool,

        /// Print output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Attempt to fix every drifted check
    ///
    /// Prints what each check program reports after its fix. Run `check`
    /// again to confirm the fixes converged.
    Fix {
        /// Directories to fix
        #[arg(default_value = ".")]
        dirs: Vec<PathBuf>,

        /// Print output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List discovered checks without running them
    List {
        /// Directories to search
        #[arg(default_value = ".")]
        dirs: Vec<PathBuf>,

        /// Print output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Execute the check command
pub fn execute_check<P: Protocol, W: Write>(
    loader: &Loader<P>,
    dirs: &[PathBuf],
    all: bool,
    format: OutputFormat,
    out: &mut W,
) -> Result<ExitCode, CliError> {
    let checks = loader.new_set(dirs)?;
    let results = checks.execute(loader.protocol());
    let results = if all { results } else { results.changed() };

    emit(out, &render_results(&results, format)?)?;
    Ok(ExitCode::Success)
}

/// Execute the fix command
pub fn execute_fix<P: Protocol, W: Write>(
    loader: &Loader<P>,
    dirs: &[PathBuf],
    format: OutputFormat,
    out: &mut W,
) -> Result<ExitCode, CliError> {
    let checks = loader.new_set(dirs)?;
    let drifted = checks.execute(loader.protocol()).changed();
    tracing::info!(drifted = drifted.len(), "fixing drifted checks");
    let fixed = drifted.fix(loader.protocol());

    emit(out, &render_results(&fixed, format)?)?;
    Ok(ExitCode::Success)
}

/// Execute the list command
pub fn execute_list<P: Protocol, W: Write>(
    loader: &Loader<P>,
    dirs: &[PathBuf],
    format: OutputFormat,
    out: &mut W,
) -> Result<ExitCode, CliError> {
    let checks = loader.new_set(dirs)?;
    emit(out, &render_checks(&checks, format)?)?;
    Ok(ExitCode::Success)
}
