//! Schema reconstruction: fold ordered history into last-known table shapes.

use std::collections::HashMap;

use tacit_schema::TableShape;

use crate::artifact::{MigrationArtifact, SchemaOperation};
use crate::error::{MigrateResult, MigrationError};

/// Fold every operation of the given artifacts, in order, into the table
/// shapes the last migration run believed the schema to be.
///
/// The fold is deterministic and total. Column operations upsert or
/// override by name; an operation that cannot apply cleanly (alter or drop
/// of something that should already exist, duplicate pivot creation)
/// indicates corrupted or hand-edited history and fails with a
/// [`MigrationError::HistoryConsistency`] carrying the offending artifact.
pub fn reconstruct(artifacts: &[MigrationArtifact]) -> MigrateResult<HashMap<String, TableShape>> {
    let mut tables: HashMap<String, TableShape> = HashMap::new();

    for artifact in artifacts {
        for operation in &artifact.operations {
            apply_operation(&mut tables, operation)
                .map_err(|message| MigrationError::history(&artifact.id, message))?;
        }
    }

    Ok(tables)
}

fn apply_operation(
    tables: &mut HashMap<String, TableShape>,
    operation: &SchemaOperation,
) -> Result<(), String> {
    match operation {
        SchemaOperation::AddColumn { table, column } => {
            // Upserts by name: a re-added column takes the new definition.
            tables
                .entry(table.to_string())
                .or_insert_with(|| TableShape::new(table.clone()))
                .insert_column(column.clone());
        }
        SchemaOperation::AlterColumn { table, column } => {
            let shape = existing(tables, table, "alter column")?;
            if shape.column(column.name()).is_none() {
                return Err(format!(
                    "alter of unknown column `{}.{}`",
                    table,
                    column.name()
                ));
            }
            shape.insert_column(column.clone());
        }
        SchemaOperation::DropColumn { table, column } => {
            let shape = existing(tables, table, "drop column")?;
            if shape.remove_column(column).is_none() {
                return Err(format!("drop of unknown column `{}.{}`", table, column));
            }
        }
        SchemaOperation::CreatePivotTable { table } => {
            if tables.contains_key(table.as_str()) {
                return Err(format!("pivot table `{}` created twice", table));
            }
            tables.insert(table.to_string(), TableShape::pivot(table.clone()));
        }
        SchemaOperation::AddForeignKey {
            table,
            relationship,
        } => {
            let shape = tables
                .entry(table.to_string())
                .or_insert_with(|| TableShape::new(table.clone()));
            if shape.relationship_to(&relationship.related_table).is_some() {
                return Err(format!(
                    "foreign key to `{}` on `{}` added twice",
                    relationship.related_table, table
                ));
            }
            shape.add_relationship(relationship.clone());
        }
        SchemaOperation::DropForeignKey {
            table,
            related_table,
        } => {
            let shape = existing(tables, table, "drop foreign key")?;
            if shape.remove_relationship_to(related_table).is_none() {
                return Err(format!(
                    "drop of unknown foreign key to `{}` on `{}`",
                    related_table, table
                ));
            }
        }
    }

    Ok(())
}

fn existing<'a>(
    tables: &'a mut HashMap<String, TableShape>,
    table: &str,
    context: &str,
) -> Result<&'a mut TableShape, String> {
    tables
        .get_mut(table)
        .ok_or_else(|| format!("{} on unknown table `{}`", context, table))
}
