//! Loader configuration

/// Name of the subdirectory that holds check programs
pub const DEFAULT_DISCOVERY_DIR: &str = ".prospectus.d";

/// Configuration for check discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Subdirectory of each target directory that is scanned for programs
    pub discovery_dir: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            discovery_dir: DEFAULT_DISCOVERY_DIR.to_string(),
        }
    }
}

impl LoaderConfig {
    /// Create a config with the default discovery directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the discovery directory name
    pub fn with_discovery_dir(mut self, name: impl Into<String>) -> Self {
        self.discovery_dir = name.into();
        self
    }
}
