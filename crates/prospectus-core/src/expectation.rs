//! Expected-state descriptors
//!
//! A check program reports the state it observed as a plain string and
//! describes what it wanted to see as an [`Expectation`]. On the wire an
//! expectation is a `{"type": ..., "data": {...}}` object; the `type` selects
//! the comparison applied to the observed value.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a check expects its observed value to look like
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Expectation {
    /// The observed value must equal `value` exactly
    Equals { value: String },
    /// The observed value must be one of `values`
    OneOf { values: Vec<String> },
    /// The observed value must contain a match for `pattern`
    Regex { pattern: String },
    /// The check could not be evaluated; never matches
    Error { msg: String },
}

impl Expectation {
    /// Build an error expectation carrying `msg`
    pub fn error(msg: impl Into<String>) -> Self {
        Expectation::Error { msg: msg.into() }
    }

    /// Wire discriminator for this expectation
    pub fn kind(&self) -> &'static str {
        match self {
            Expectation::Equals { .. } => "equals",
            Expectation::OneOf { .. } => "one_of",
            Expectation::Regex { .. } => "regex",
            Expectation::Error { .. } => "error",
        }
    }

    /// Compare an observed value against this expectation
    pub fn matches(&self, actual: &str) -> bool {
        match self {
            Expectation::Equals { value } => value == actual,
            Expectation::OneOf { values } => values.iter().any(|v| v == actual),
            Expectation::Regex { pattern } => match Regex::new(pattern) {
                Ok(re) => re.is_match(actual),
                Err(e) => {
                    tracing::warn!(%pattern, error = %e, "invalid expectation pattern");
                    false
                }
            },
            Expectation::Error { .. } => false,
        }
    }

    /// Check if this is an error expectation
    pub fn is_error(&self) -> bool {
        matches!(self, Expectation::Error { .. })
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Equals { value } => write!(f, "{}", value),
            Expectation::OneOf { values } => write!(f, "one of [{}]", values.join(", ")),
            Expectation::Regex { pattern } => write!(f, "/{}/", pattern),
            Expectation::Error { msg } => write!(f, "{}", msg),
        }
    }
}
