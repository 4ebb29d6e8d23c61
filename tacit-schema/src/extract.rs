//! Schema extraction: turn an entity description into table shapes.

use smol_str::SmolStr;
use tracing::debug;

use crate::declaration::{EntityDescription, RelationshipDeclaration};
use crate::error::{SchemaError, SchemaResult};
use crate::relationship::{DirectRelationship, IndirectRelationship};
use crate::shape::TableShape;

/// Extract the table shapes an entity currently declares: the entity's own
/// table followed by one pivot shape per indirect relationship.
///
/// Pure transformation; fails with a declaration error when the declared
/// shape is incomplete or contradictory.
pub fn extract_shapes(entity: &dyn EntityDescription) -> SchemaResult<Vec<TableShape>> {
    let table = entity.table_name();
    debug!(entity = entity.entity_name(), table, "extracting table shapes");

    let mut shape = TableShape::new(table);
    for column in entity.columns() {
        if shape.column(column.name()).is_some() {
            return Err(SchemaError::duplicate("column", table, column.name()));
        }
        shape.insert_column(column.clone());
    }

    let mut pivots: Vec<TableShape> = Vec::new();
    for declaration in entity.relationships() {
        match declaration {
            RelationshipDeclaration::Direct {
                related_table,
                foreign_key,
                local_key,
            } => {
                if shape.relationship_to(related_table).is_some() {
                    return Err(SchemaError::duplicate(
                        "relationship",
                        table,
                        related_table.as_str(),
                    ));
                }
                shape.add_relationship(
                    DirectRelationship::new(related_table.clone(), foreign_key.clone())
                        .with_local_key(local_key.clone()),
                );
            }
            RelationshipDeclaration::Indirect { .. } => {
                let relationship = build_indirect(entity, declaration)?;
                let pivot = pivot_shape(entity, &relationship)?;
                if pivots.iter().any(|p| p.table_name == pivot.table_name) {
                    return Err(SchemaError::declaration(
                        entity.entity_name(),
                        format!("duplicate pivot table `{}`", pivot.table_name),
                    ));
                }
                pivots.push(pivot);
            }
        }
    }

    let mut shapes = vec![shape];
    shapes.extend(pivots);
    Ok(shapes)
}

/// Build the relationship value for an indirect declaration, deriving the
/// pivot table name from the participating tables when it was omitted.
fn build_indirect(
    entity: &dyn EntityDescription,
    declaration: &RelationshipDeclaration,
) -> SchemaResult<IndirectRelationship> {
    let RelationshipDeclaration::Indirect {
        pivot_table,
        related_tables,
        foreign_keys,
        local_keys,
        pivot_columns,
    } = declaration
    else {
        return Err(SchemaError::declaration(
            entity.entity_name(),
            "expected an indirect relationship declaration",
        ));
    };

    if related_tables.is_empty() {
        return Err(SchemaError::declaration(
            entity.entity_name(),
            "indirect relationship declares no related tables",
        ));
    }

    let own_table = SmolStr::new(entity.table_name());
    let mut relationship = IndirectRelationship::new();
    for related in related_tables {
        relationship = relationship.add_related_table(related.clone());
    }
    if !related_tables.contains(&own_table) {
        relationship = relationship.add_related_table(own_table.clone());
    }

    let name = match pivot_table {
        Some(name) => name.clone(),
        None => derive_pivot_table_name(relationship.related_tables()),
    };
    relationship = relationship.set_pivot_table(name);

    for participant in relationship.related_tables().to_vec() {
        let Some(foreign_key) = foreign_keys.get(&participant) else {
            return Err(SchemaError::declaration(
                entity.entity_name(),
                format!("indirect relationship has no foreign key for `{}`", participant),
            ));
        };
        relationship = relationship.add_foreign_key(participant.clone(), foreign_key.clone());

        let local_key = local_keys
            .get(&participant)
            .cloned()
            .unwrap_or_else(|| SmolStr::new_static("id"));
        relationship = relationship.add_local_key(participant, local_key);
    }

    for column in pivot_columns {
        relationship = relationship.add_pivot_column(column.name.clone());
    }
    relationship = relationship.set_pivot_column_attributes(pivot_columns.clone());

    Ok(relationship)
}

/// Default pivot table name: the participating tables, sorted, joined
/// with `_`.
fn derive_pivot_table_name(participants: &[SmolStr]) -> SmolStr {
    let mut names: Vec<&str> = participants.iter().map(SmolStr::as_str).collect();
    names.sort_unstable();
    SmolStr::new(names.join("_"))
}

/// Materialize an indirect relationship as the shape of its pivot table:
/// the pivot-carried columns plus one foreign-key entry per participant.
fn pivot_shape(
    entity: &dyn EntityDescription,
    relationship: &IndirectRelationship,
) -> SchemaResult<TableShape> {
    let name = relationship.pivot_table()?;
    let mut shape = TableShape::pivot(name);

    for column in relationship.pivot_column_attributes() {
        if shape.column(column.name()).is_some() {
            return Err(SchemaError::duplicate("column", name, column.name()));
        }
        shape.insert_column(column.clone());
    }

    for participant in relationship.related_tables() {
        // Mappings were validated while the relationship was built.
        let foreign_key = relationship.foreign_keys().get(participant).ok_or_else(|| {
            SchemaError::declaration(
                entity.entity_name(),
                format!("indirect relationship has no foreign key for `{}`", participant),
            )
        })?;
        let local_key = relationship
            .local_keys()
            .get(participant)
            .cloned()
            .unwrap_or_else(|| SmolStr::new_static("id"));

        shape.add_relationship(
            DirectRelationship::new(participant.clone(), foreign_key.clone())
                .with_local_key(local_key),
        );
    }

    Ok(shape)
}
