//! The diagnostic handle.
//!
//! Every fallible record operation takes a `Handle`. It is the sink that
//! failures are reported to before they are returned, and it carries the
//! configuration that changes how records are enumerated. A handle holds no
//! reference to any policy database and may be shared freely.

use std::fmt;

use crate::log_event;
use crate::utils::{HandleConfig, LogLevel};

/// Diagnostic sink and configuration carrier.
#[derive(Debug, Clone, Default)]
pub struct Handle {
    config: HandleConfig,
}

impl Handle {
    /// Create a handle with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handle with the given configuration.
    pub fn with_config(config: HandleConfig) -> Self {
        Self { config }
    }

    /// The configuration of this handle.
    pub fn config(&self) -> &HandleConfig {
        &self.config
    }

    /// Whether messages of the given level are emitted.
    pub fn enabled(&self, level: LogLevel) -> bool {
        level.is_at_least(self.config.log_level)
    }

    /// Whether enumeration skips kernel-form aliases.
    pub fn hide_kernel_aliases(&self) -> bool {
        self.config.hide_kernel_aliases
    }

    /// Report a message at the given level.
    pub fn report(&self, level: LogLevel, message: impl fmt::Display) {
        if self.enabled(level) {
            log_event!(level, message.to_string());
        }
    }

    /// Report an error.
    pub fn err(&self, message: impl fmt::Display) {
        self.report(LogLevel::Error, message);
    }

    /// Report a warning.
    pub fn warn(&self, message: impl fmt::Display) {
        self.report(LogLevel::Warning, message);
    }

    /// Report an informational message.
    pub fn info(&self, message: impl fmt::Display) {
        self.report(LogLevel::Info, message);
    }

    /// Report a debug message.
    pub fn debug(&self, message: impl fmt::Display) {
        self.report(LogLevel::Debug, message);
    }
}
