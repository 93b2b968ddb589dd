//! # Sepol Core
//!
//! `sepol_core` provides the building blocks shared by the sepol crates:
//! the error hierarchy, the diagnostic `Handle`, typed record keys and the
//! ordered string set every record uses for its multi-valued fields.
//!
//! ## Crate Structure
//!
//! - **error**: Error types and the crate-wide `Result`
//! - **handle**: Diagnostic sink and configuration carrier
//! - **key**: Typed, name-based record keys
//! - **string_set**: Insertion-ordered set of unique names
//! - **utils**: Logging levels and handle configuration
//! - **macros**: `log_event!` and `try_report!`

pub mod error;
pub mod handle;
pub mod key;
pub mod macros;
pub mod string_set;
pub mod utils;

// Re-export key types for convenience
pub use error::{Error, PolicyError, Result, TranslationError};
pub use handle::Handle;
pub use key::{ClassKey, Key, RoleKey, TypeKey, UserKey};
pub use string_set::StringSet;
pub use utils::{HandleConfig, LogLevel};
