//! End-to-end tests for `tacit generate` output.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

const ORDER: &str = r#"
name  = "Order"
table = "orders"

[[columns]]
name = "id"
type = "int"

[[columns]]
name = "total"
type = "decimal"
"#;

fn project_with_order() -> tempfile::TempDir {
    let project = tempfile::tempdir().unwrap();
    write_model(project.path(), "order.toml", ORDER);
    project
}

fn write_model(project: &Path, file: &str, declaration: &str) {
    let models = project.join("models");
    std::fs::create_dir_all(&models).unwrap();
    std::fs::write(models.join(file), declaration).unwrap();
}

fn tacit(project: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tacit").unwrap();
    cmd.current_dir(project);
    cmd
}

#[test]
fn first_run_creates_then_reports_no_changes() {
    let project = project_with_order();

    tacit(project.path())
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created migration:"));

    // One migration file landed in the default history location.
    let migrations: Vec<_> = std::fs::read_dir(project.path().join("migrations"))
        .unwrap()
        .collect();
    assert_eq!(migrations.len(), 1);

    tacit(project.path())
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Order has no changes."));
}

#[test]
fn unknown_entity_is_reported() {
    let project = project_with_order();

    tacit(project.path())
        .args(["generate", "Invoice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No declaration found for entity `Invoice`."));
}

#[test]
fn broken_declaration_does_not_stop_the_batch() {
    let project = project_with_order();
    write_model(
        project.path(),
        "user.toml",
        r#"
        name  = "User"
        table = "users"

        [[relationships]]
        kind           = "indirect"
        related_tables = ["roles"]
        "#,
    );

    // `order.toml` sorts before `user.toml`, so the good entity still
    // generates even though the bad one fails.
    tacit(project.path())
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created migration:"))
        .stderr(predicate::str::contains("User"));
}

#[test]
fn missing_model_directory_warns() {
    let project = tempfile::tempdir().unwrap();

    tacit(project.path())
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("No entity declarations found."));
}
