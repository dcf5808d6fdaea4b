//! Error types for polysql

use thiserror::Error;

/// Result type alias for polysql operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Error types for query building and compilation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SqlError {
    /// Malformed builder input (empty raw SQL, empty CASE, bad NTILE count, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// An operator string outside the fixed comparison-operator set
    #[error("Unknown operator '{given}' (accepted: {accepted})")]
    Operator { given: String, accepted: String },

    /// An identifier or expression that failed sanitization
    #[error("Invalid identifier '{input}': {reason}")]
    Identifier { input: String, reason: String },

    /// A structurally valid operation requested against a dialect that does not implement it
    #[error("{feature} is not supported in the {dialect} dialect; consider {alternative}")]
    Unsupported {
        feature: String,
        dialect: String,
        alternative: String,
    },
}

impl SqlError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an identifier error for a rejected input
    pub fn identifier(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Identifier {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create an unsupported-feature error
    pub fn unsupported(
        feature: impl Into<String>,
        dialect: impl Into<String>,
        alternative: impl Into<String>,
    ) -> Self {
        Self::Unsupported {
            feature: feature.into(),
            dialect: dialect.into(),
            alternative: alternative.into(),
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an operator error
    pub fn is_operator(&self) -> bool {
        matches!(self, Self::Operator { .. })
    }

    /// Check if this is an identifier error
    pub fn is_identifier(&self) -> bool {
        matches!(self, Self::Identifier { .. })
    }

    /// Check if this is an unsupported-feature error
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}
