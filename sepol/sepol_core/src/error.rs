//! Error types for the sepol record layer.
//!
//! The record layer knows two failure kinds: running out of memory while
//! building an owned copy, and finding an internal datum that cannot be
//! translated (a value with no name, an enum tag nobody defined). Both are
//! wrapped by the root `Error`, next to the policy-building, configuration
//! and I/O errors of the surrounding tooling.

use std::collections::TryReserveError;
use thiserror::Error;

/// Root error type for the sepol record layer.
#[derive(Debug, Error)]
pub enum Error {
    /// Growing an owned collection failed.
    #[error("out of memory: {0}")]
    OutOfMemory(#[from] TryReserveError),

    /// An internal datum could not be turned into a record.
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Building or modifying the policy database failed.
    #[error("Policy error: {0}")]
    Policy(#[from] PolicyError),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while translating an internal datum into a record.
///
/// Any of these means the database is corrupt; the caller never sees a
/// partially built record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranslationError {
    /// A value index has no entry in the value→name table.
    #[error("no {table} name for value {value}")]
    UnknownValue {
        /// Which value→name table was consulted.
        table: &'static str,
        /// The 1-based internal value.
        value: u32,
    },

    /// Unrecognized type or role flavor.
    #[error("unknown flavor {0}")]
    UnknownFlavor(u32),

    /// Unrecognized constraint expression type.
    #[error("unknown constraint expression type {0}")]
    UnknownExprType(u32),

    /// Unrecognized constraint operator.
    #[error("unknown constraint operator {0}")]
    UnknownOperator(u32),

    /// A names expression does not select user, role or type.
    #[error("no name table for constraint attribute {attr:#x}")]
    NoNameTable {
        /// The raw attribute mask of the offending expression.
        attr: u32,
    },

    /// The postfix expression list does not form a tree.
    #[error("malformed constraint expression: {0}")]
    MalformedExpression(String),

    /// A class names a common that is not in the database.
    #[error("class refers to missing common {0}")]
    MissingCommon(String),
}

/// Errors raised while building or modifying the policy database, or when a
/// record operation is given an out-of-range argument.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// A symbol with this name already exists in its table.
    #[error("duplicate {kind} {name}")]
    Duplicate {
        /// Symbol kind ("class", "type", ...).
        kind: &'static str,
        /// The duplicated name.
        name: String,
    },

    /// A referenced symbol does not exist.
    #[error("unknown {kind} {name}")]
    UnknownName {
        /// Symbol kind ("class", "type", ...).
        kind: &'static str,
        /// The missing name.
        name: String,
    },

    /// A symbol exists but has the wrong flavor for the operation.
    #[error("{name} is not a {expected}")]
    WrongFlavor {
        /// The offending name.
        name: String,
        /// What the operation required.
        expected: &'static str,
    },

    /// A class has more permissions than a constraint mask can address.
    #[error("class {class} has more than {max} permissions")]
    TooManyPermissions {
        /// The class name.
        class: String,
        /// Maximum permissions per class.
        max: u32,
    },

    /// An index is past the end of the list it addresses.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The list length.
        len: usize,
    },

    /// A record is missing a field the operation needs.
    #[error("record is missing {0}")]
    MissingField(&'static str),
}

/// Result type used throughout the sepol record layer.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let err: Error = TranslationError::UnknownFlavor(9).into();
        assert!(matches!(
            err,
            Error::Translation(TranslationError::UnknownFlavor(9))
        ));

        let err: Error = PolicyError::MissingField("name").into();
        assert!(matches!(err, Error::Policy(PolicyError::MissingField(_))));

        let mut v: Vec<u64> = Vec::new();
        let reserve = v.try_reserve(usize::MAX).unwrap_err();
        let err: Error = reserve.into();
        assert!(matches!(err, Error::OutOfMemory(_)));
    }

    #[test]
    fn test_error_display() {
        let err = TranslationError::UnknownValue {
            table: "type",
            value: 7,
        };
        assert_eq!(err.to_string(), "no type name for value 7");

        let err = Error::from(PolicyError::Duplicate {
            kind: "class",
            name: "file".to_string(),
        });
        assert_eq!(err.to_string(), "Policy error: duplicate class file");

        let err = TranslationError::NoNameTable { attr: 0x20 };
        assert_eq!(
            err.to_string(),
            "no name table for constraint attribute 0x20"
        );
    }
}
