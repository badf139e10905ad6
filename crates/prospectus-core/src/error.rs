//! Error types for prospectus
//!
//! Errors come in two tiers. [`ProspectusError`] covers setup failures during
//! discovery, which abort the whole operation. [`ProtocolError`] covers a
//! single exchange with a check program; during execute and fix these are
//! folded into error results instead of being returned.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors raised by a single request/response exchange with a check program
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// The program could not be started
    #[error("failed to start {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading from or writing to the program's pipes failed
    #[error("I/O error talking to {}: {source}", .program.display())]
    Io {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The program exited unsuccessfully
    #[error("{} exited with {status}", .program.display())]
    ExitStatus { program: PathBuf, status: ExitStatus },

    /// The request could not be encoded
    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// The program's output did not match the expected shape
    #[error("invalid response from {}: {source}", .program.display())]
    Decode {
        program: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for protocol exchanges
pub type ProtocolResult<T> = std::result::Result<T, ProtocolError>;

/// Errors that abort check discovery
#[derive(Error, Debug)]
pub enum ProspectusError {
    /// A target path could not be made absolute
    #[error("failed to resolve path {}: {source}", .path.display())]
    PathResolution {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The discovery directory is missing or unreadable
    #[error("failed to read directory {}: {source}", .path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A check program failed to answer `load`
    #[error("failed loading {}: {source}", .file.display())]
    Load {
        file: PathBuf,
        #[source]
        source: ProtocolError,
    },

    /// Results could not be serialized for output
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ProspectusError {
    /// Check if this error stems from the operator's setup rather than a bug
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ProspectusError::PathResolution { .. }
                | ProspectusError::DirectoryRead { .. }
                | ProspectusError::Load { .. }
        )
    }
}

/// Result type alias for prospectus operations
pub type Result<T> = std::result::Result<T, ProspectusError>;
