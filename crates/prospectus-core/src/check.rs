//! Checks and check sets
//!
//! A [`Check`] is one assertion defined by an external program. Its `name` and
//! `metadata` come from the program's `load` response; `dir` and `file` are
//! stamped by the loader and are the only way a check finds its program again.

use crate::protocol::{Protocol, Verb};
use crate::result::{CheckResult, ResultSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;
use std::path::PathBuf;

/// A single check, ready for execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    /// Absolute directory the check was discovered for
    #[serde(default)]
    pub dir: PathBuf,
    /// Program that defines the check
    #[serde(default)]
    pub file: PathBuf,
    /// Identifier chosen by the program
    pub name: String,
    /// Free-form data the program wants back on `execute`
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl Check {
    /// Run the check, folding any protocol failure into an error result
    pub fn execute<P: Protocol + ?Sized>(&self, protocol: &P) -> CheckResult {
        CheckResult::from_exchange(Verb::Execute, protocol.execute(self), self)
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.dir.display(), self.name)
    }
}

/// Ordered collection of checks
///
/// Order follows discovery: directory arguments, then directory listing, then
/// each program's `load` response. Everything derived from a set keeps it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckSet(Vec<Check>);

impl CheckSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append checks, keeping their order
    pub fn extend(&mut self, checks: impl IntoIterator<Item = Check>) {
        self.0.extend(checks);
    }

    /// Execute every check in order
    ///
    /// Checks run one at a time; the result at index `i` always belongs to
    /// the check at index `i`.
    pub fn execute<P: Protocol + ?Sized>(&self, protocol: &P) -> ResultSet {
        self.0.iter().map(|check| check.execute(protocol)).collect()
    }

    /// Render the set as indented JSON
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Deref for CheckSet {
    type Target = [Check];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Check>> for CheckSet {
    fn from(checks: Vec<Check>) -> Self {
        Self(checks)
    }
}

impl FromIterator<Check> for CheckSet {
    fn from_iter<T: IntoIterator<Item = Check>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for CheckSet {
    type Item = Check;
    type IntoIter = std::vec::IntoIter<Check>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a CheckSet {
    type Item = &'a Check;
    type IntoIter = std::slice::Iter<'a, Check>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
