//! Output formatting for the prospectus CLI
//!
//! Results render either as the plain `<dir>::<name>: <actual> / <expected>`
//! report or as indented JSON. The check listing adds color in text mode.

use colored::Colorize;
use prospectus_core::{CheckSet, ResultSet};
use std::io::Write;

use crate::error::CliError;

/// Output format options for CLI results
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum OutputFormat {
    /// One line per item
    #[default]
    Text,
    /// Indented JSON for machine processing
    Json,
}

impl OutputFormat {
    /// Pick the format selected by a `--json` flag
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Render a result set
pub fn render_results(results: &ResultSet, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => Ok(results.to_json()?),
        OutputFormat::Text => Ok(results.to_string()),
    }
}

/// Render discovered checks
pub fn render_checks(checks: &CheckSet, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => Ok(checks.to_json()?),
        OutputFormat::Text => Ok(checks
            .iter()
            .map(|check| {
                format!(
                    "{}  {}",
                    check.to_string().bold(),
                    check.file.display().to_string().dimmed()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

/// Write a rendered report, skipping empty ones
pub fn emit<W: Write>(out: &mut W, rendered: &str) -> Result<(), CliError> {
    if !rendered.is_empty() {
        writeln!(out, "{}", rendered)?;
        out.flush()?;
    }
    Ok(())
}
