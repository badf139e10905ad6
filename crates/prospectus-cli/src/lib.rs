//! Prospectus CLI
//!
//! Command-line front end for [`prospectus_core`].
//!
//! ## CLI Usage
//!
//! ```bash
//! # Report drifted checks under the current directory
//! prospectus check
//!
//! # Report every check in two directories as JSON
//! prospectus check --all --json /srv/app /srv/db
//!
//! # Ask check programs to fix whatever drifted
//! prospectus fix /srv/app
//!
//! # Show what discovery finds
//! prospectus list /srv/app
//! ```
//!
//! ## Exit Codes
//!
//! - 0: Report produced (drift or not)
//! - 3: Discovery failed
//! - 10: Internal error

pub mod cli;
pub mod error;

pub use cli::{ExitCode, OutputFormat, ProspectusCli, ProspectusCommands};
pub use error::CliError;

use colored::Colorize;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Run the CLI application, reporting errors on stderr
pub fn run_cli(cli: ProspectusCli) -> ExitCode {
    if cli.no_color {
        colored::control::set_override(false);
    }

    match cli::run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            if e.is_user_error() {
                ExitCode::DiscoveryError
            } else {
                ExitCode::InternalError
            }
        }
    }
}

/// Install the stderr log subscriber
///
/// A non-empty `RUST_LOG` replaces the level picked by `verbose` entirely.
pub fn init_tracing(verbose: u8) {
    let directives = std::env::var("RUST_LOG").unwrap_or_default();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, &directives))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn log_filter(verbose: u8, directives: &str) -> EnvFilter {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(directives)
}
