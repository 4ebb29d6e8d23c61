//! Column definitions.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::types::ScalarType;

/// A column in a table shape. Identity is the name within a table;
/// equality is structural over all four fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: SmolStr,
    /// Scalar type.
    #[serde(rename = "type")]
    pub scalar_type: ScalarType,
    /// Whether the column accepts NULL.
    #[serde(default)]
    pub nullable: bool,
    /// Default value expression, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl Column {
    /// Create a new non-nullable column without a default.
    pub fn new(name: impl Into<SmolStr>, scalar_type: ScalarType) -> Self {
        Self {
            name: name.into(),
            scalar_type,
            nullable: false,
            default: None,
        }
    }

    /// Set whether the column is nullable.
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Set the default value expression.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Get the column name as a string.
    pub fn name(&self) -> &str {
        &self.name
    }
}
