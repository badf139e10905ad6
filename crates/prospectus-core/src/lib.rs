//! Prospectus core
//!
//! Drift detection driven by external check programs. Prospectus itself knows
//! nothing about what is being checked: it discovers programs from a
//! filesystem convention, talks to them over a small JSON protocol and reports
//! where the observed state diverges from what each program expected.
//!
//! ## Flow
//!
//! 1. **Discovery** (`loader`): every entry of `<dir>/.prospectus.d` is asked
//!    for its checks with `load`.
//! 2. **Execution** (`check`): each check is sent back to its program with
//!    `execute`, producing a result.
//! 3. **Evaluation** (`result`): results are compared against their
//!    expectation, filtered to drift and rendered.
//! 4. **Remediation** (`result`): drifted results can be handed to `fix`.
//!
//! Setup failures abort discovery with a [`ProspectusError`]. Failures while
//! executing or fixing a single check never abort the batch; they surface as
//! error results that are always reported as drift.
//!
//! ## Example
//!
//! ```rust,no_run
//! use prospectus_core::{Loader, ProcessProtocol};
//!
//! let loader = Loader::new();
//! let checks = loader.new_set(["/srv/app"])?;
//! let results = checks.execute(&ProcessProtocol::new());
//! println!("{}", results.changed());
//! # Ok::<(), prospectus_core::ProspectusError>(())
//! ```

pub mod check;
pub mod config;
pub mod error;
pub mod expectation;
pub mod loader;
pub mod protocol;
pub mod result;

pub use check::{Check, CheckSet};
pub use config::{LoaderConfig, DEFAULT_DISCOVERY_DIR};
pub use error::{ProspectusError, ProtocolError, ProtocolResult, Result};
pub use expectation::Expectation;
pub use loader::Loader;
pub use protocol::{LoadRequest, Observation, ProcessProtocol, Protocol, Verb};
pub use result::{CheckResult, ResultSet, ERROR_ACTUAL};
