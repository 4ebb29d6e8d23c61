//! Error types for entity declarations and schema extraction.

use miette::Diagnostic;
use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur while interpreting entity declarations.
#[derive(Error, Debug, Diagnostic)]
pub enum SchemaError {
    /// An entity's declared shape is incomplete or contradictory.
    #[error("invalid declaration for `{entity}`: {message}")]
    #[diagnostic(code(tacit::schema::declaration))]
    Declaration { entity: String, message: String },

    /// Duplicate definition within one table.
    #[error("duplicate {kind} `{name}` in table `{table}`")]
    #[diagnostic(code(tacit::schema::duplicate))]
    Duplicate {
        kind: String,
        table: String,
        name: String,
    },

    /// A required field was read before being set.
    #[error("{message}")]
    #[diagnostic(code(tacit::schema::state))]
    State { message: String },

    /// A declaration document failed to parse.
    #[error("failed to parse entity declaration")]
    #[diagnostic(code(tacit::schema::toml_error))]
    TomlError {
        #[source]
        source: toml::de::Error,
    },
}

impl SchemaError {
    /// Create a declaration error.
    pub fn declaration(entity: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Declaration {
            entity: entity.into(),
            message: message.into(),
        }
    }

    /// Create a duplicate definition error.
    pub fn duplicate(
        kind: impl Into<String>,
        table: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self::Duplicate {
            kind: kind.into(),
            table: table.into(),
            name: name.into(),
        }
    }

    /// Create a state error.
    pub fn state(message: impl Into<String>) -> Self {
        Self::State {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_display() {
        let err = SchemaError::declaration("User", "missing pivot table");
        assert!(err.to_string().contains("User"));
        assert!(err.to_string().contains("missing pivot table"));
    }

    #[test]
    fn test_duplicate_display() {
        let err = SchemaError::duplicate("column", "users", "email");
        assert_eq!(err.to_string(), "duplicate column `email` in table `users`");
    }
}
