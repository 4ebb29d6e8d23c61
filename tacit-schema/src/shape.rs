//! Table shapes: the normalized schema of one table at one logical point
//! in time.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::column::Column;
use crate::relationship::DirectRelationship;

/// The believed-or-declared structure of one table.
///
/// Shapes are ephemeral values: built fresh on every generation run, either
/// from an entity declaration or by folding migration history, and discarded
/// once the diff is computed. Relationship entries are keyed by related
/// table; indirect associations appear as the shape of their pivot table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableShape {
    /// Table name.
    pub table_name: SmolStr,
    /// Columns by name.
    pub columns: IndexMap<SmolStr, Column>,
    /// Foreign-key entries by related table.
    pub relationships: IndexMap<SmolStr, DirectRelationship>,
    /// Whether this shape describes a pivot table.
    pub pivot: bool,
}

impl TableShape {
    /// Create an empty shape for a regular table.
    pub fn new(table_name: impl Into<SmolStr>) -> Self {
        Self {
            table_name: table_name.into(),
            columns: IndexMap::new(),
            relationships: IndexMap::new(),
            pivot: false,
        }
    }

    /// Create an empty shape for a pivot table.
    pub fn pivot(table_name: impl Into<SmolStr>) -> Self {
        Self {
            pivot: true,
            ..Self::new(table_name)
        }
    }

    /// Get the table name as a string.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Insert or replace a column by name.
    pub fn insert_column(&mut self, column: Column) -> Option<Column> {
        self.columns.insert(column.name.clone(), column)
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Remove a column by name, preserving the order of the rest.
    pub fn remove_column(&mut self, name: &str) -> Option<Column> {
        self.columns.shift_remove(name)
    }

    /// Insert or replace the relationship entry for its related table.
    pub fn add_relationship(&mut self, relationship: DirectRelationship) -> Option<DirectRelationship> {
        self.relationships
            .insert(relationship.related_table.clone(), relationship)
    }

    /// Look up the relationship entry for a related table.
    pub fn relationship_to(&self, related_table: &str) -> Option<&DirectRelationship> {
        self.relationships.get(related_table)
    }

    /// Remove the relationship entry for a related table.
    pub fn remove_relationship_to(&mut self, related_table: &str) -> Option<DirectRelationship> {
        self.relationships.shift_remove(related_table)
    }

    /// Whether the shape has no columns and no relationships.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.relationships.is_empty()
    }
}
