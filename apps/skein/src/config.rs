//! # Configuration
//!
//! Optional TOML configuration for the skein binary.
//!
//! ```toml
//! [engine]
//! max_depth = 256
//! max_reductions = 1000   # optional
//!
//! [output]
//! latex = false
//! results_log = "results.csv"   # optional
//! ```
//!
//! Missing sections and keys fall back to defaults. Command-line flags
//! override file values.

use serde::{Deserialize, Serialize};
use crate::cli::{InputKind, read_input};
use skein_core::{EngineConfig, SkeinError};
use std::path::{Path, PathBuf};

/// Output preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Print polynomials in typeset form.
    pub latex: bool,
    /// Results log that batch runs append to.
    pub results_log: Option<PathBuf>,
}

/// Complete configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SkeinConfig {
    pub engine: EngineConfig,
    pub output: OutputConfig,
}

impl SkeinConfig {
    /// Parse configuration text.
    pub fn from_toml(text: &str) -> Result<Self, SkeinError> {
        toml::from_str(text).map_err(|e| SkeinError::ConfigError(e.to_string()))
    }

    /// Load from a file, or use defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self, SkeinError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let (canonical, text) = read_input(path, InputKind::Config)?;
        let config = Self::from_toml(&text)?;
        tracing::debug!(path = %canonical.display(), "configuration loaded");
        Ok(config)
    }

    /// Apply command-line overrides.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        if let Some(depth) = max_depth {
            self.engine.max_depth = depth;
        }
        self
    }
}
