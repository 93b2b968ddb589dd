//! Utility types shared by the sepol crates: logging levels and handle
//! configuration.

pub mod config;
pub mod logging;

pub use config::HandleConfig;
pub use logging::LogLevel;
