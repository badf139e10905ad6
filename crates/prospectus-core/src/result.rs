//! Execution results
//!
//! A [`CheckResult`] pairs what a check observed with what it expected. A
//! result whose expectation does not match is drift; failed exchanges with a
//! check program show up as results too, carrying an error expectation that
//! never matches.

use crate::check::Check;
use crate::error::ProtocolResult;
use crate::expectation::Expectation;
use crate::protocol::{Observation, Protocol, Verb};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Observed value reported for results synthesized from a failure
pub const ERROR_ACTUAL: &str = "error";

/// Outcome of executing or fixing a check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Rendering of the observed state
    pub actual: String,
    /// What the check wanted to see
    pub expected: Expectation,
    /// The check this result belongs to
    pub check: Check,
}

impl CheckResult {
    /// Pair a program's observation with the check it describes
    pub fn new(observation: Observation, check: Check) -> Self {
        Self {
            actual: observation.actual,
            expected: observation.expected,
            check,
        }
    }

    /// Build an error result for `check`
    pub fn error(msg: impl Into<String>, check: Check) -> Self {
        Self {
            actual: ERROR_ACTUAL.to_string(),
            expected: Expectation::error(msg),
            check,
        }
    }

    /// Turn the outcome of one exchange into a result
    pub(crate) fn from_exchange(
        verb: Verb,
        outcome: ProtocolResult<Observation>,
        check: &Check,
    ) -> Self {
        match outcome {
            Ok(observation) => Self::new(observation, check.clone()),
            Err(e) => {
                tracing::warn!(check = %check, %verb, error = %e, "check program failed");
                Self::error(format!("{} error: {}", verb, e), check.clone())
            }
        }
    }

    /// True when the observed state satisfies the expectation
    pub fn matches(&self) -> bool {
        self.expected.matches(&self.actual)
    }

    /// True when this result records a failed exchange rather than drift
    pub fn is_error(&self) -> bool {
        self.expected.is_error()
    }

    /// Ask the check's program to remediate this result
    ///
    /// The returned result is whatever the program reports after fixing; it
    /// is not re-verified. Run the check again to confirm convergence.
    pub fn fix<P: Protocol + ?Sized>(&self, protocol: &P) -> CheckResult {
        Self::from_exchange(Verb::Fix, protocol.fix(self), &self.check)
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} / {}", self.check, self.actual, self.expected)
    }
}

/// Ordered collection of results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet(Vec<CheckResult>);

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Results that do not match their expectation, in order
    pub fn changed(&self) -> ResultSet {
        self.0.iter().filter(|r| !r.matches()).cloned().collect()
    }

    /// Fix every result in order
    pub fn fix<P: Protocol + ?Sized>(&self, protocol: &P) -> ResultSet {
        self.0.iter().map(|r| r.fix(protocol)).collect()
    }

    /// Render the set as indented JSON
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn into_inner(self) -> Vec<CheckResult> {
        self.0
    }
}

impl fmt::Display for ResultSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, result) in self.0.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", result)?;
        }
        Ok(())
    }
}

impl Deref for ResultSet {
    type Target = [CheckResult];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<CheckResult>> for ResultSet {
    fn from(results: Vec<CheckResult>) -> Self {
        Self(results)
    }
}

impl FromIterator<CheckResult> for ResultSet {
    fn from_iter<T: IntoIterator<Item = CheckResult>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ResultSet {
    type Item = CheckResult;
    type IntoIter = std::vec::IntoIter<CheckResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a CheckResult;
    type IntoIter = std::slice::Iter<'a, CheckResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
