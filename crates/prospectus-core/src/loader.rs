//! Check discovery
//!
//! Each target directory may hold a discovery subdirectory (`.prospectus.d`
//! by default). Every entry in it is a check program; the loader asks each
//! one for its checks with `load` and stamps the answers with the directory
//! and program they came from.
//!
//! Discovery is all-or-nothing. A bad path, a missing discovery directory or
//! a program that fails `load` aborts the whole call, since nothing useful
//! can be reported per check before discovery has finished.

use crate::check::{Check, CheckSet};
use crate::config::LoaderConfig;
use crate::error::{ProspectusError, Result};
use crate::protocol::{ProcessProtocol, Protocol};
use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Discovers checks through a [`Protocol`]
#[derive(Debug, Clone)]
pub struct Loader<P = ProcessProtocol> {
    protocol: P,
    config: LoaderConfig,
}

impl Loader<ProcessProtocol> {
    /// Create a loader that spawns real check programs
    pub fn new() -> Self {
        Self::with_protocol(ProcessProtocol::new())
    }
}

impl Default for Loader<ProcessProtocol> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Protocol> Loader<P> {
    /// Create a loader backed by `protocol`
    pub fn with_protocol(protocol: P) -> Self {
        Self {
            protocol,
            config: LoaderConfig::default(),
        }
    }

    /// Replace the loader configuration
    pub fn with_config(mut self, config: LoaderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn protocol(&self) -> &P {
        &self.protocol
    }

    /// Discover every check under `paths`, in argument order
    pub fn new_set<I, T>(&self, paths: I) -> Result<CheckSet>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<Path>,
    {
        let dirs = paths
            .into_iter()
            .map(|p| resolve(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let mut set = CheckSet::new();
        for dir in &dirs {
            set.extend(self.load_dir(dir)?);
        }

        tracing::info!(dirs = dirs.len(), checks = set.len(), "discovered checks");
        Ok(set)
    }

    fn load_dir(&self, dir: &Path) -> Result<Vec<Check>> {
        let discovery = dir.join(&self.config.discovery_dir);
        let read_err = |source| ProspectusError::DirectoryRead {
            path: discovery.clone(),
            source,
        };

        let mut checks = Vec::new();
        // Listing order is kept as the filesystem returns it.
        for entry in fs::read_dir(&discovery).map_err(read_err)? {
            let file = entry.map_err(read_err)?.path();
            checks.extend(self.load_file(dir, &file)?);
        }
        Ok(checks)
    }

    fn load_file(&self, dir: &Path, file: &Path) -> Result<Vec<Check>> {
        tracing::debug!(file = %file.display(), "loading checks");
        let mut checks =
            self.protocol
                .load(file, dir)
                .map_err(|source| ProspectusError::Load {
                    file: file.to_path_buf(),
                    source,
                })?;

        for check in &mut checks {
            check.dir = dir.to_path_buf();
            check.file = file.to_path_buf();
        }
        Ok(checks)
    }
}

/// Make `path` absolute and lexically clean
///
/// An empty path names the working directory. `.` segments and trailing
/// separators are dropped and `..` pops its parent, without touching the
/// filesystem, so symlinks are left unresolved.
fn resolve(path: &Path) -> Result<PathBuf> {
    let resolution_err = |source| ProspectusError::PathResolution {
        path: path.to_path_buf(),
        source,
    };

    let absolute = if path.as_os_str().is_empty() {
        env::current_dir().map_err(resolution_err)?
    } else {
        std::path::absolute(path).map_err(resolution_err)?
    };
    Ok(clean(&absolute))
}

fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root.
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}
