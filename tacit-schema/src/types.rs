//! Scalar column types.

use serde::{Deserialize, Serialize};

/// Scalar type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarType {
    /// 32-bit integer.
    Int,
    /// 64-bit integer.
    BigInt,
    /// Double-precision float.
    Float,
    /// Arbitrary-precision decimal.
    Decimal,
    /// Variable-length text.
    String,
    /// Boolean.
    Boolean,
    /// Timestamp with time zone.
    DateTime,
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
    /// JSON document.
    Json,
    /// Raw bytes.
    Bytes,
    /// UUID.
    Uuid,
}

impl std::fmt::Display for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Int => "int",
            Self::BigInt => "big_int",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::DateTime => "date_time",
            Self::Date => "date",
            Self::Time => "time",
            Self::Json => "json",
            Self::Bytes => "bytes",
            Self::Uuid => "uuid",
        };
        write!(f, "{}", name)
    }
}
