//! Error types for the migration engine.

use thiserror::Error;

use tacit_schema::SchemaError;

/// Result type alias for migration operations.
pub type MigrateResult<T> = Result<T, MigrationError>;

/// Errors that can occur during migration generation.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// File system error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Entity declaration or relationship-model error.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Folding the migration history hit an operation that cannot apply
    /// cleanly. Indicates corrupted or hand-edited history.
    #[error("history consistency error in `{artifact}`: {message}")]
    HistoryConsistency { artifact: String, message: String },

    /// Failed to render an artifact body.
    #[error("failed to render migration artifact: {0}")]
    Render(String),
}

impl MigrationError {
    /// Create a history consistency error.
    pub fn history(artifact: impl Into<String>, message: impl Into<String>) -> Self {
        Self::HistoryConsistency {
            artifact: artifact.into(),
            message: message.into(),
        }
    }
}
