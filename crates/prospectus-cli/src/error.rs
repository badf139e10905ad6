//! Error types for the prospectus CLI

use prospectus_core::ProspectusError;
use thiserror::Error;

/// Errors that end a CLI run
#[derive(Error, Debug)]
pub enum CliError {
    /// Discovery or rendering failed in the core
    #[error(transparent)]
    Prospectus(#[from] ProspectusError),

    /// The report could not be written
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl CliError {
    /// Check if this is a setup error the operator can fix
    pub fn is_user_error(&self) -> bool {
        match self {
            CliError::Prospectus(e) => e.is_user_error(),
            CliError::Output(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_discovery_errors_are_user_errors() {
        let err = CliError::from(ProspectusError::DirectoryRead {
            path: PathBuf::from("/srv/app/.prospectus.d"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        });
        assert!(err.is_user_error());
        assert_eq!(
            err.to_string(),
            "failed to read directory /srv/app/.prospectus.d: missing"
        );
    }

    #[test]
    fn test_output_errors_are_internal() {
        let err = CliError::from(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"));
        assert!(!err.is_user_error());
    }
}
