//! Check program protocol
//!
//! Every check program speaks the same small protocol: it is started with a
//! single verb argument, receives one JSON document on stdin and answers with
//! one JSON document on stdout.
//!
//! | Verb      | Input                          | Output                      |
//! |-----------|--------------------------------|-----------------------------|
//! | `load`    | `{"dir": <absolute path>}`     | list of `{"name","metadata"}` |
//! | `execute` | the [`Check`]                  | `{"actual","expected"}`     |
//! | `fix`     | the full [`CheckResult`]       | `{"actual","expected"}`     |
//!
//! The [`Protocol`] trait captures these three exchanges so the loader and
//! the execution code never care whether a real process sits behind them.

pub mod process;

pub use process::ProcessProtocol;

use crate::check::Check;
use crate::error::ProtocolResult;
use crate::expectation::Expectation;
use crate::result::CheckResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Protocol verbs, passed to the program as its only argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Load,
    Execute,
    Fix,
}

impl Verb {
    /// The argument string handed to the program
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Load => "load",
            Verb::Execute => "execute",
            Verb::Fix => "fix",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input document for `load`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadRequest {
    pub dir: PathBuf,
}

/// What a program reports back from `execute` or `fix`
///
/// Any `check` field in the response is ignored; the caller always pairs the
/// observation with the check it asked about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub actual: String,
    pub expected: Expectation,
}

/// The three exchanges a check program supports
#[cfg_attr(test, mockall::automock)]
pub trait Protocol {
    /// Ask `file` for the checks it defines for `dir`
    ///
    /// The returned checks carry whatever `dir`/`file` the program sent;
    /// the loader overwrites both.
    fn load(&self, file: &Path, dir: &Path) -> ProtocolResult<Vec<Check>>;

    /// Run a check through its defining program
    fn execute(&self, check: &Check) -> ProtocolResult<Observation>;

    /// Ask the defining program to remediate a result
    fn fix(&self, result: &CheckResult) -> ProtocolResult<Observation>;
}
