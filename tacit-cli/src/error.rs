//! CLI error types and result alias.

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// IO error
    #[error("IO error: {0}")]
    #[diagnostic(code(tacit::io))]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    #[diagnostic(code(tacit::config))]
    Config(String),

    /// Entity declaration error
    #[error("Declaration error: {0}")]
    #[diagnostic(code(tacit::declaration))]
    Declaration(String),

    /// Migration error
    #[error("Migration error: {0}")]
    #[diagnostic(code(tacit::migration))]
    Migration(String),
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::Config(format!("Failed to parse TOML: {}", err))
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(err: toml::ser::Error) -> Self {
        CliError::Config(format!("Failed to serialize TOML: {}", err))
    }
}

impl From<tacit_schema::SchemaError> for CliError {
    fn from(err: tacit_schema::SchemaError) -> Self {
        CliError::Declaration(err.to_string())
    }
}

impl From<tacit_migrate::MigrationError> for CliError {
    fn from(err: tacit_migrate::MigrationError) -> Self {
        CliError::Migration(err.to_string())
    }
}
