// Copyright 2025 Cowboy AI, LLC.

//! Error types for prototype composition and property access

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::identifiers::PrototypeId;

/// The kind of write that was attempted against a frozen prototype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MutationKind {
    /// A property that did not exist was added
    Add,
    /// An existing property was reassigned
    Assign,
    /// A property was deleted
    Delete,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationKind::Add => write!(f, "add"),
            MutationKind::Assign => write!(f, "assign"),
            MutationKind::Delete => write!(f, "delete"),
        }
    }
}

/// Errors that can occur while composing, instantiating or calling into objects
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PrototypeError {
    /// A write or delete was attempted on a frozen prototype
    #[error("Cannot {kind} property '{key}' of frozen prototype {prototype}")]
    FrozenMutation {
        /// Prototype that rejected the write
        prototype: PrototypeId,
        /// Property name that was targeted
        key: String,
        /// What kind of write was attempted
        kind: MutationKind,
    },

    /// Property is not defined anywhere on the delegation chain
    #[error("Property not found: {key}")]
    PropertyNotFound {
        /// Property name that was looked up
        key: String,
    },

    /// Property was found but is not a method
    #[error("Property '{key}' is not callable (found {found})")]
    NotCallable {
        /// Property name that was invoked
        key: String,
        /// Type name of the value actually stored
        found: &'static str,
    },

    /// Property holds a value of an unexpected type
    #[error("Type mismatch for '{key}': expected {expected}, found {found}")]
    TypeMismatch {
        /// Property name that was read
        key: String,
        /// Type name the caller asked for
        expected: &'static str,
        /// Type name of the value actually stored
        found: &'static str,
    },

    /// Error raised from inside a method body
    #[error("Method error: {0}")]
    Method(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for prototype operations
pub type PrototypeResult<T> = Result<T, PrototypeError>;

impl From<serde_json::Error> for PrototypeError {
    fn from(err: serde_json::Error) -> Self {
        PrototypeError::Config(err.to_string())
    }
}

impl PrototypeError {
    /// Create an error to be returned from a method body
    pub fn method(msg: impl Into<String>) -> Self {
        PrototypeError::Method(msg.into())
    }

    /// Check if this error was caused by writing to a frozen prototype
    pub fn is_frozen_mutation(&self) -> bool {
        matches!(self, PrototypeError::FrozenMutation { .. })
    }

    /// Check if this error came from resolving a property
    pub fn is_lookup_error(&self) -> bool {
        matches!(
            self,
            PrototypeError::PropertyNotFound { .. }
                | PrototypeError::NotCallable { .. }
                | PrototypeError::TypeMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test error creation and display messages
    ///
    /// ```mermaid
    /// graph TD
    ///     A[PrototypeError] -->|Display| B[Error Message]
    ///     A -->|Clone| C[Cloned Error]
    /// ```
    #[test]
    fn test_error_display_messages() {
        let err = PrototypeError::FrozenMutation {
            prototype: PrototypeId::ROOT,
            key: "extend".to_string(),
            kind: MutationKind::Assign,
        };
        assert_eq!(
            err.to_string(),
            format!(
                "Cannot assign property 'extend' of frozen prototype {}",
                PrototypeId::ROOT
            )
        );

        let err = PrototypeError::PropertyNotFound {
            key: "missing".to_string(),
        };
        assert_eq!(err.to_string(), "Property not found: missing");

        let err = PrototypeError::NotCallable {
            key: "name".to_string(),
            found: "string",
        };
        assert_eq!(err.to_string(), "Property 'name' is not callable (found string)");

        let err = PrototypeError::TypeMismatch {
            key: "x".to_string(),
            expected: "integer",
            found: "string",
        };
        assert_eq!(
            err.to_string(),
            "Type mismatch for 'x': expected integer, found string"
        );

        let err = PrototypeError::method("bad color");
        assert_eq!(err.to_string(), "Method error: bad color");
    }

    #[test]
    fn test_mutation_kind_display() {
        assert_eq!(MutationKind::Add.to_string(), "add");
        assert_eq!(MutationKind::Assign.to_string(), "assign");
        assert_eq!(MutationKind::Delete.to_string(), "delete");
    }

    /// Test classification helpers
    #[test]
    fn test_error_predicates() {
        let frozen = PrototypeError::FrozenMutation {
            prototype: PrototypeId::new(),
            key: "foo".to_string(),
            kind: MutationKind::Add,
        };
        assert!(frozen.is_frozen_mutation());
        assert!(!frozen.is_lookup_error());

        let missing = PrototypeError::PropertyNotFound {
            key: "foo".to_string(),
        };
        assert!(missing.is_lookup_error());
        assert!(!missing.is_frozen_mutation());

        assert!(!PrototypeError::method("boom").is_lookup_error());
    }

    /// Test conversion from serde_json errors
    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json")
            .expect_err("invalid json");
        let err: PrototypeError = json_err.into();
        assert!(matches!(err, PrototypeError::Config(_)));
        assert!(err.to_string().starts_with("Configuration error:"));
    }
}
