//! Configuration for a `Handle`.
//!
//! A handle carries the diagnostic threshold and the few switches that
//! change how records are enumerated. Configuration is plain serde data and
//! can be loaded from TOML.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use super::LogLevel;
use crate::error::{Error, Result};

/// Configuration for a `Handle`.
///
/// Every field has a default, so an empty TOML document is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandleConfig {
    /// Diagnostics below this level are dropped.
    pub log_level: LogLevel,

    /// Skip kernel-form aliases (non-primary regular types) when
    /// enumerating types. Direct queries still find them.
    pub hide_kernel_aliases: bool,
}

impl Default for HandleConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            hide_kernel_aliases: false,
        }
    }
}

impl HandleConfig {
    /// Parse a configuration from a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Render this configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Set the diagnostic threshold.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Enable or disable hiding of kernel-form aliases during enumeration.
    pub fn with_hidden_kernel_aliases(mut self, hide: bool) -> Self {
        self.hide_kernel_aliases = hide;
        self
    }
}

impl fmt::Display for HandleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "log_level={} hide_kernel_aliases={}",
            self.log_level, self.hide_kernel_aliases
        )
    }
}
