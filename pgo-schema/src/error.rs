//! Error types for request loading and schema graph handling.

use thiserror::Error;

/// Error type for request loading operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON decoding error.
    #[error("request decoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid request structure.
    #[error("invalid request structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error type for schema graph errors.
///
/// Every variant is fatal for the whole request.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A referenced node id is not registered.
    #[error("could not find node 0x{id:x}")]
    NodeNotFound {
        /// Node id.
        id: u64,
    },

    /// The same node id was registered twice.
    #[error("duplicate node 0x{id:x}")]
    DuplicateNode {
        /// Node id.
        id: u64,
    },

    /// A node id refers to a node of the wrong kind.
    #[error("expected {expected} node for 0x{id:x}, found {found}")]
    UnexpectedKind {
        /// Node id.
        id: u64,
        /// Expected node kind.
        expected: &'static str,
        /// Actual node kind.
        found: &'static str,
    },

    /// A node was referenced before any file claimed it during resolution.
    #[error("node 0x{id:x} has no resolved name")]
    Unresolved {
        /// Node id.
        id: u64,
    },

    /// A file or referenced declaration has no package annotation.
    #[error("missing package declaration for {name}")]
    MissingPackage {
        /// Display name of the file or declaration.
        name: String,
    },

    /// A cross-file reference needs an import path that was never declared.
    #[error("missing import declaration for {name}")]
    MissingImport {
        /// Display name of the referenced declaration.
        name: String,
    },

    /// Mutually exclusive presence annotations on one field.
    #[error("field '{field}': annotations '{first}' and '{second}' are incompatible")]
    ConflictingAnnotations {
        /// Declared field name.
        field: String,
        /// First annotation.
        first: &'static str,
        /// Second annotation.
        second: &'static str,
    },
}

impl ParseError {
    /// Creates an invalid structure error.
    pub fn invalid_structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            message: message.into(),
        }
    }
}

impl SchemaError {
    /// Creates a missing package error.
    pub fn missing_package(name: impl Into<String>) -> Self {
        Self::MissingPackage { name: name.into() }
    }

    /// Creates a missing import error.
    pub fn missing_import(name: impl Into<String>) -> Self {
        Self::MissingImport { name: name.into() }
    }
}
