//! Structural diffing between a declared table shape and its last-known
//! shape.

use smol_str::SmolStr;

use tacit_schema::{Column, DirectRelationship, TableShape};

use crate::artifact::SchemaOperation;

/// The delta for one table: the operations needed to turn the last-known
/// shape into the currently declared one.
#[derive(Debug, Clone, Default)]
pub struct TableDiff {
    /// Table name.
    pub table: SmolStr,
    /// The table is a pivot with no history and must be created first.
    pub create_pivot: bool,
    /// Columns present only in the declared shape.
    pub add_columns: Vec<Column>,
    /// Columns present in both shapes with a different definition.
    pub alter_columns: Vec<Column>,
    /// Columns present only in the last-known shape.
    pub drop_columns: Vec<SmolStr>,
    /// Foreign-key entries present only in the declared shape.
    pub add_foreign_keys: Vec<DirectRelationship>,
    /// Related tables whose entry is present only in the last-known shape.
    pub drop_foreign_keys: Vec<SmolStr>,
}

impl TableDiff {
    /// Check if there are any differences.
    pub fn is_empty(&self) -> bool {
        !self.create_pivot
            && self.add_columns.is_empty()
            && self.alter_columns.is_empty()
            && self.drop_columns.is_empty()
            && self.add_foreign_keys.is_empty()
            && self.drop_foreign_keys.is_empty()
    }

    /// Get a human-readable summary of the diff.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        if self.create_pivot {
            parts.push(format!("Create pivot table `{}`", self.table));
        }
        if !self.add_columns.is_empty() {
            parts.push(format!("Add {} columns", self.add_columns.len()));
        }
        if !self.alter_columns.is_empty() {
            parts.push(format!("Alter {} columns", self.alter_columns.len()));
        }
        if !self.drop_columns.is_empty() {
            parts.push(format!("Drop {} columns", self.drop_columns.len()));
        }
        if !self.add_foreign_keys.is_empty() {
            parts.push(format!("Add {} foreign keys", self.add_foreign_keys.len()));
        }
        if !self.drop_foreign_keys.is_empty() {
            parts.push(format!("Drop {} foreign keys", self.drop_foreign_keys.len()));
        }

        if parts.is_empty() {
            "No changes".to_string()
        } else {
            parts.join(", ")
        }
    }

    /// Convert the diff into operations in safe application order:
    /// table creation first, then column operations, then foreign keys
    /// (drops before adds, so a changed key mapping folds cleanly).
    pub fn into_operations(self) -> Vec<SchemaOperation> {
        let table = self.table;
        let mut operations = Vec::new();

        if self.create_pivot {
            operations.push(SchemaOperation::CreatePivotTable {
                table: table.clone(),
            });
        }
        for column in self.add_columns {
            operations.push(SchemaOperation::AddColumn {
                table: table.clone(),
                column,
            });
        }
        for column in self.alter_columns {
            operations.push(SchemaOperation::AlterColumn {
                table: table.clone(),
                column,
            });
        }
        for column in self.drop_columns {
            operations.push(SchemaOperation::DropColumn {
                table: table.clone(),
                column,
            });
        }
        for related_table in self.drop_foreign_keys {
            operations.push(SchemaOperation::DropForeignKey {
                table: table.clone(),
                related_table,
            });
        }
        for relationship in self.add_foreign_keys {
            operations.push(SchemaOperation::AddForeignKey {
                table: table.clone(),
                relationship,
            });
        }

        operations
    }
}

/// Diff a declared shape against its last-known shape (`None` when the
/// table has no history at all).
///
/// Relationship entries are compared structurally; any change to a key
/// mapping yields a drop + add pair, never a partial alter.
pub fn diff_table(current: &TableShape, last_known: Option<&TableShape>) -> TableDiff {
    let empty = TableShape::new(current.table_name.clone());
    let last = last_known.unwrap_or(&empty);

    let mut diff = TableDiff {
        table: current.table_name.clone(),
        create_pivot: current.pivot && last_known.is_none(),
        ..TableDiff::default()
    };

    for (name, column) in &current.columns {
        match last.column(name) {
            None => diff.add_columns.push(column.clone()),
            Some(known) if known != column => diff.alter_columns.push(column.clone()),
            Some(_) => {}
        }
    }
    for name in last.columns.keys() {
        if current.column(name).is_none() {
            diff.drop_columns.push(name.clone());
        }
    }

    for (related_table, relationship) in &current.relationships {
        match last.relationship_to(related_table) {
            None => diff.add_foreign_keys.push(relationship.clone()),
            Some(known) if known != relationship => {
                diff.drop_foreign_keys.push(related_table.clone());
                diff.add_foreign_keys.push(relationship.clone());
            }
            Some(_) => {}
        }
    }
    for related_table in last.relationships.keys() {
        if current.relationship_to(related_table).is_none() {
            diff.drop_foreign_keys.push(related_table.clone());
        }
    }

    diff
}
