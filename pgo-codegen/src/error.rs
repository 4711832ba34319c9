//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Request loading error.
    #[error("request parse error: {0}")]
    Parse(#[from] pgo_schema::ParseError),

    /// Schema graph error.
    #[error("schema error: {0}")]
    Schema(#[from] pgo_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A constant or default value disagrees with its declared type.
    #[error("malformed default in {context}: expected {expected} value, found {found}")]
    ValueMismatch {
        /// Where the value was found.
        context: String,
        /// Declared type kind.
        expected: &'static str,
        /// Value kind.
        found: &'static str,
    },

    /// A value shape the generator cannot encode faithfully.
    #[error("unsupported {feature} in {context}")]
    Unsupported {
        /// Unsupported shape.
        feature: &'static str,
        /// Where the shape was found.
        context: String,
    },

    /// Source formatter failure.
    #[error("format error: {message}")]
    Format {
        /// Error message.
        message: String,
    },

    /// Code generation error.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },
}

impl CodegenError {
    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Creates a format error with the given message.
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Creates a value mismatch error.
    pub fn value_mismatch(
        context: impl Into<String>,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        Self::ValueMismatch {
            context: context.into(),
            expected,
            found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_is_distinct_from_schema_errors() {
        let err = CodegenError::Unsupported {
            feature: "list of struct value",
            context: "const Defaults".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported list of struct value in const Defaults");

        let err: CodegenError = pgo_schema::SchemaError::NodeNotFound { id: 0x1f }.into();
        assert!(matches!(err, CodegenError::Schema(_)));
        assert!(err.to_string().contains("0x1f"));
    }

    #[test]
    fn test_value_mismatch_message() {
        let err = CodegenError::value_mismatch("field Point.x", "int32", "text");
        assert_eq!(
            err.to_string(),
            "malformed default in field Point.x: expected int32 value, found text"
        );
    }
}
