//! Migration artifacts: the immutable unit of history.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use tacit_schema::{Column, DirectRelationship};

use crate::error::{MigrateResult, MigrationError};

/// One schema operation recorded in a migration artifact.
///
/// Operations reference tables and columns by name only, so folding history
/// is order-dependent. Indirect relationships are always persisted as their
/// pivot-table projection: a pivot creation plus one foreign-key entry per
/// participating table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SchemaOperation {
    /// Add or replace a column by name; seeds the table on first appearance.
    AddColumn { table: SmolStr, column: Column },
    /// Replace an existing column's definition.
    AlterColumn { table: SmolStr, column: Column },
    /// Remove a column by name.
    DropColumn { table: SmolStr, column: SmolStr },
    /// Seed an empty pivot table.
    CreatePivotTable { table: SmolStr },
    /// Add a foreign-key entry, keyed by its related table.
    AddForeignKey {
        table: SmolStr,
        relationship: DirectRelationship,
    },
    /// Remove the foreign-key entry for a related table.
    DropForeignKey {
        table: SmolStr,
        related_table: SmolStr,
    },
}

impl SchemaOperation {
    /// The table this operation targets.
    pub fn table(&self) -> &str {
        match self {
            Self::AddColumn { table, .. }
            | Self::AlterColumn { table, .. }
            | Self::DropColumn { table, .. }
            | Self::CreatePivotTable { table }
            | Self::AddForeignKey { table, .. }
            | Self::DropForeignKey { table, .. } => table,
        }
    }
}

/// Wire format of an artifact body. The identifier lives in the file name,
/// not the body, so history loading can sort without parsing.
#[derive(Debug, Serialize, Deserialize)]
struct ArtifactBody {
    operations: Vec<SchemaOperation>,
}

/// An immutable, time-ordered record of schema operations.
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationArtifact {
    /// Byte-lexicographically sortable identifier embedding creation time:
    /// `<timestamp>_<nonce>_<description>`.
    pub id: String,
    /// Recorded operations, in application order.
    pub operations: Vec<SchemaOperation>,
}

impl MigrationArtifact {
    /// Create an artifact.
    pub fn new(id: impl Into<String>, operations: Vec<SchemaOperation>) -> Self {
        Self {
            id: id.into(),
            operations,
        }
    }

    /// Parse an artifact body, tagging the source as an artifact or not.
    ///
    /// Returns `None` when the document is not an artifact; history loading
    /// skips such sources rather than failing.
    pub fn from_toml(id: impl Into<String>, body: &str) -> Option<Self> {
        let body: ArtifactBody = toml::from_str(body).ok()?;
        Some(Self::new(id, body.operations))
    }

    /// Render the artifact body to its wire format.
    pub fn render(&self) -> MigrateResult<String> {
        let body = ArtifactBody {
            operations: self.operations.clone(),
        };
        toml::to_string_pretty(&body).map_err(|e| MigrationError::Render(e.to_string()))
    }
}

/// A generated artifact ready to be written to the history store.
#[derive(Debug, Clone)]
pub struct RenderedArtifact {
    /// Artifact identifier.
    pub id: String,
    /// Target file name (`<id>.toml`).
    pub file_name: String,
    /// Rendered body.
    pub body: String,
}

/// Produces collision-resistant, sortable artifact identifiers.
///
/// The nonce is an explicit per-generator counter rather than process-wide
/// state; zero-padding keeps identifiers minted within one timestamp in
/// mint order under byte-lexicographic sorting.
#[derive(Debug, Default)]
pub struct ArtifactIdGenerator {
    nonce: u32,
}

impl ArtifactIdGenerator {
    /// Create a generator with the nonce at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint the next identifier for a migration touching `table`.
    pub fn next_id(&mut self, table: &str) -> String {
        let timestamp = Utc::now().format("%Y_%m_%d_%H%M%S");
        let id = format!(
            "{}_{:04}_implicit_migration_{}",
            timestamp, self.nonce, table
        );
        self.nonce += 1;
        id
    }
}
