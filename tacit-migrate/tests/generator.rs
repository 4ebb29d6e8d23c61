//! End-to-end generator behavior: delta-only output, idempotence, and
//! history-order determinism.

use pretty_assertions::assert_eq;

use tacit_migrate::{
    MigrationArtifact, MigrationGenerator, RenderedArtifact, SchemaOperation, reconstruct,
};
use tacit_schema::{EntityDeclaration, SchemaError, extract_shapes};

fn entity(document: &str) -> EntityDeclaration {
    EntityDeclaration::from_toml(document).unwrap()
}

/// Fold a rendered artifact back into a history snapshot, the way a later
/// run would load it from disk. The identifier is pinned so tests control
/// history order exactly.
fn as_history(rendered: &RenderedArtifact, id: &str) -> MigrationArtifact {
    let mut artifact =
        MigrationArtifact::from_toml(id, &rendered.body).expect("rendered body parses back");
    artifact.id = id.to_string();
    artifact
}

const ORDER_V1: &str = r#"
name  = "Order"
table = "orders"

[[columns]]
name = "id"
type = "int"

[[columns]]
name = "total"
type = "decimal"
"#;

const ORDER_V2: &str = r#"
name  = "Order"
table = "orders"

[[columns]]
name = "id"
type = "int"

[[columns]]
name = "total"
type = "decimal"

[[columns]]
name     = "status"
type     = "string"
nullable = true
"#;

const ORDER_V3: &str = r#"
name  = "Order"
table = "orders"

[[columns]]
name = "id"
type = "int"

[[columns]]
name     = "status"
type     = "string"
nullable = true
"#;

const USER_V1: &str = r#"
name  = "User"
table = "users"

[[columns]]
name = "id"
type = "int"

[[relationships]]
kind           = "indirect"
pivot_table    = "role_user"
related_tables = ["roles"]
foreign_keys   = { roles = "role_id", users = "user_id" }
"#;

const USER_V2: &str = r#"
name  = "User"
table = "users"

[[columns]]
name = "id"
type = "int"

[[relationships]]
kind           = "indirect"
pivot_table    = "role_user"
related_tables = ["roles"]
foreign_keys   = { roles = "role_uuid", users = "user_id" }
"#;

#[test]
fn order_column_lifecycle() {
    // First migration ever for this table: adds only.
    let mut generator = MigrationGenerator::new(Vec::new());
    let first = generator.generate(&entity(ORDER_V1)).unwrap().unwrap();
    let first = as_history(&first, "2026_01_01_000000_0000_implicit_migration_orders");

    assert_eq!(first.operations.len(), 2);
    assert!(
        first
            .operations
            .iter()
            .all(|op| matches!(op, SchemaOperation::AddColumn { .. }))
    );

    // Unchanged declaration: no changes, no file.
    let mut generator = MigrationGenerator::new(vec![first.clone()]);
    assert!(generator.generate(&entity(ORDER_V1)).unwrap().is_none());

    // Adding one nullable column yields exactly one add.
    let second = generator.generate(&entity(ORDER_V2)).unwrap().unwrap();
    let second = as_history(&second, "2026_01_02_000000_0000_implicit_migration_orders");
    assert_eq!(second.operations.len(), 1);
    match &second.operations[0] {
        SchemaOperation::AddColumn { table, column } => {
            assert_eq!(table, "orders");
            assert_eq!(column.name(), "status");
            assert!(column.nullable);
        }
        other => panic!("expected add column, got {:?}", other),
    }

    // Removing a column afterward yields exactly one drop.
    let mut generator = MigrationGenerator::new(vec![first, second]);
    let third = generator.generate(&entity(ORDER_V3)).unwrap().unwrap();
    let third = as_history(&third, "2026_01_03_000000_0000_implicit_migration_orders");
    assert_eq!(third.operations.len(), 1);
    match &third.operations[0] {
        SchemaOperation::DropColumn { table, column } => {
            assert_eq!(table, "orders");
            assert_eq!(column, "total");
        }
        other => panic!("expected drop column, got {:?}", other),
    }
}

#[test]
fn pivot_creation_and_key_change() {
    let mut generator = MigrationGenerator::new(Vec::new());
    let first = generator.generate(&entity(USER_V1)).unwrap().unwrap();
    let first = as_history(&first, "2026_01_01_000000_0000_implicit_migration_users");

    // The pivot part: creation first, then one foreign key per participant.
    let pivot_ops: Vec<&SchemaOperation> = first
        .operations
        .iter()
        .filter(|op| op.table() == "role_user")
        .collect();
    assert_eq!(pivot_ops.len(), 3);
    assert!(matches!(pivot_ops[0], SchemaOperation::CreatePivotTable { .. }));
    assert!(matches!(pivot_ops[1], SchemaOperation::AddForeignKey { .. }));
    assert!(matches!(pivot_ops[2], SchemaOperation::AddForeignKey { .. }));

    // Unchanged: no changes.
    let mut generator = MigrationGenerator::new(vec![first.clone()]);
    assert!(generator.generate(&entity(USER_V1)).unwrap().is_none());

    // Changed key mapping: drop + add, never an in-place alter.
    let second = generator.generate(&entity(USER_V2)).unwrap().unwrap();
    let second = as_history(&second, "2026_01_02_000000_0000_implicit_migration_users");
    assert_eq!(second.operations.len(), 2);
    match &second.operations[0] {
        SchemaOperation::DropForeignKey {
            table,
            related_table,
        } => {
            assert_eq!(table, "role_user");
            assert_eq!(related_table, "roles");
        }
        other => panic!("expected drop foreign key, got {:?}", other),
    }
    match &second.operations[1] {
        SchemaOperation::AddForeignKey {
            table,
            relationship,
        } => {
            assert_eq!(table, "role_user");
            assert_eq!(relationship.related_table, "roles");
            assert_eq!(relationship.foreign_key, "role_uuid");
        }
        other => panic!("expected add foreign key, got {:?}", other),
    }

    // The new mapping folds cleanly and a further run is quiet.
    let mut generator = MigrationGenerator::new(vec![first, second]);
    assert!(generator.generate(&entity(USER_V2)).unwrap().is_none());
}

#[test]
fn additive_round_trip_reconstructs_the_final_shape() {
    let snapshots = [ORDER_V1, ORDER_V2, ORDER_V3];

    let mut history: Vec<MigrationArtifact> = Vec::new();
    for (index, snapshot) in snapshots.iter().enumerate() {
        let mut generator = MigrationGenerator::new(history.clone());
        if let Some(rendered) = generator.generate(&entity(snapshot)).unwrap() {
            let id = format!("2026_01_0{}_000000_0000_implicit_migration_orders", index + 1);
            history.push(as_history(&rendered, &id));
        }
    }

    let reconstructed = reconstruct(&history).unwrap();
    let declared = extract_shapes(&entity(ORDER_V3)).unwrap();

    let last_known = &reconstructed["orders"];
    assert_eq!(last_known.columns, declared[0].columns);
    assert_eq!(last_known.relationships, declared[0].relationships);
}

#[test]
fn history_enumeration_order_does_not_matter() {
    let mut generator = MigrationGenerator::new(Vec::new());
    let first = generator.generate(&entity(ORDER_V1)).unwrap().unwrap();
    let first = as_history(&first, "2026_01_01_000000_0000_implicit_migration_orders");

    let mut generator = MigrationGenerator::new(vec![first.clone()]);
    let second = generator.generate(&entity(ORDER_V2)).unwrap().unwrap();
    let second = as_history(&second, "2026_01_02_000000_0000_implicit_migration_orders");

    // Same artifacts handed over in reverse enumeration order.
    let mut forward = MigrationGenerator::new(vec![first.clone(), second.clone()]);
    let mut reversed = MigrationGenerator::new(vec![second, first]);

    assert!(forward.generate(&entity(ORDER_V2)).unwrap().is_none());
    assert!(reversed.generate(&entity(ORDER_V2)).unwrap().is_none());
}

#[test]
fn declaration_errors_fail_fast_without_an_artifact() {
    let broken = entity(
        r#"
        name  = "User"
        table = "users"

        [[relationships]]
        kind           = "indirect"
        related_tables = ["roles"]
        "#,
    );

    let mut generator = MigrationGenerator::new(Vec::new());
    let err = generator.generate(&broken).unwrap_err();
    assert!(matches!(
        err,
        tacit_migrate::MigrationError::Schema(SchemaError::Declaration { .. })
    ));
}
