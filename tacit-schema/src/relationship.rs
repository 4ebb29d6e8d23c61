//! Relationship model: direct foreign-key references and indirect
//! (pivot-table) associations between tables.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::column::Column;
use crate::error::{SchemaError, SchemaResult};

/// A single foreign-key reference from one table to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectRelationship {
    /// Table being referenced.
    pub related_table: SmolStr,
    /// Foreign-key column holding the reference.
    pub foreign_key: SmolStr,
    /// Referenced column on the related table.
    pub local_key: SmolStr,
}

impl DirectRelationship {
    /// Create a relationship referencing `related_table.id` by default.
    pub fn new(related_table: impl Into<SmolStr>, foreign_key: impl Into<SmolStr>) -> Self {
        Self {
            related_table: related_table.into(),
            foreign_key: foreign_key.into(),
            local_key: SmolStr::new_static("id"),
        }
    }

    /// Set the referenced column on the related table.
    pub fn with_local_key(mut self, local_key: impl Into<SmolStr>) -> Self {
        self.local_key = local_key.into();
        self
    }
}

/// A many-to-many association materialized via a pivot table.
///
/// The pivot table name must be set before the relationship is used: the
/// pivot is itself a schema object and cannot be emitted without a name.
/// Builder methods are additive or wholesale-replacing; removal is expressed
/// only by constructing a fresh relationship.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndirectRelationship {
    pivot_table: Option<SmolStr>,
    related_tables: Vec<SmolStr>,
    foreign_keys: BTreeMap<SmolStr, SmolStr>,
    local_keys: BTreeMap<SmolStr, SmolStr>,
    pivot_columns: Vec<SmolStr>,
    pivot_column_attributes: Vec<Column>,
}

impl IndirectRelationship {
    /// Create an empty indirect relationship.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pivot table name.
    pub fn set_pivot_table(mut self, pivot_table: impl Into<SmolStr>) -> Self {
        self.pivot_table = Some(pivot_table.into());
        self
    }

    /// Replace the participating tables.
    pub fn set_related_tables(mut self, related_tables: Vec<SmolStr>) -> Self {
        self.related_tables = related_tables;
        self
    }

    /// Append a participating table.
    pub fn add_related_table(mut self, related_table: impl Into<SmolStr>) -> Self {
        self.related_tables.push(related_table.into());
        self
    }

    /// Replace the per-table foreign-key mapping.
    pub fn set_foreign_keys(mut self, foreign_keys: BTreeMap<SmolStr, SmolStr>) -> Self {
        self.foreign_keys = foreign_keys;
        self
    }

    /// Map one participating table to its foreign-key column on the pivot.
    pub fn add_foreign_key(
        mut self,
        related_table: impl Into<SmolStr>,
        foreign_key: impl Into<SmolStr>,
    ) -> Self {
        self.foreign_keys.insert(related_table.into(), foreign_key.into());
        self
    }

    /// Replace the per-table local-key mapping.
    pub fn set_local_keys(mut self, local_keys: BTreeMap<SmolStr, SmolStr>) -> Self {
        self.local_keys = local_keys;
        self
    }

    /// Map one participating table to the column the pivot references on it.
    pub fn add_local_key(
        mut self,
        table_name: impl Into<SmolStr>,
        local_key: impl Into<SmolStr>,
    ) -> Self {
        self.local_keys.insert(table_name.into(), local_key.into());
        self
    }

    /// Replace the extra pivot-carried column names.
    pub fn set_pivot_columns(mut self, pivot_columns: Vec<SmolStr>) -> Self {
        self.pivot_columns = pivot_columns;
        self
    }

    /// Append an extra pivot-carried column name.
    pub fn add_pivot_column(mut self, pivot_column: impl Into<SmolStr>) -> Self {
        self.pivot_columns.push(pivot_column.into());
        self
    }

    /// Replace the declared pivot-column descriptors. These describe the
    /// same columns as [`pivot_columns`](Self::pivot_columns) and must stay
    /// name-consistent with that list.
    pub fn set_pivot_column_attributes(mut self, attributes: Vec<Column>) -> Self {
        self.pivot_column_attributes = attributes;
        self
    }

    /// Get the pivot table name.
    ///
    /// Fails with [`SchemaError::State`] when the name was never set: an
    /// indirect relationship must not be finalized or diffed without one.
    pub fn pivot_table(&self) -> SchemaResult<&str> {
        self.pivot_table
            .as_deref()
            .ok_or_else(|| SchemaError::state("unable to get pivot table before setting"))
    }

    /// Whether a pivot table name has been set.
    pub fn has_pivot_table(&self) -> bool {
        self.pivot_table.is_some()
    }

    /// Get the participating tables in declaration order.
    pub fn related_tables(&self) -> &[SmolStr] {
        &self.related_tables
    }

    /// Get the per-table foreign-key mapping.
    pub fn foreign_keys(&self) -> &BTreeMap<SmolStr, SmolStr> {
        &self.foreign_keys
    }

    /// Get the per-table local-key mapping.
    pub fn local_keys(&self) -> &BTreeMap<SmolStr, SmolStr> {
        &self.local_keys
    }

    /// Get the extra pivot-carried column names.
    pub fn pivot_columns(&self) -> &[SmolStr] {
        &self.pivot_columns
    }

    /// Get the declared pivot-column descriptors.
    pub fn pivot_column_attributes(&self) -> &[Column] {
        &self.pivot_column_attributes
    }
}

/// Equality is structural: same pivot table, same participating tables as a
/// set, same key mappings, same pivot column name set. Any difference means
/// the relationship changed and is diffed as drop + add, never as a partial
/// alter.
impl PartialEq for IndirectRelationship {
    fn eq(&self, other: &Self) -> bool {
        fn as_set(names: &[SmolStr]) -> BTreeSet<&SmolStr> {
            names.iter().collect()
        }

        self.pivot_table == other.pivot_table
            && as_set(&self.related_tables) == as_set(&other.related_tables)
            && self.foreign_keys == other.foreign_keys
            && self.local_keys == other.local_keys
            && as_set(&self.pivot_columns) == as_set(&other.pivot_columns)
    }
}

impl Eq for IndirectRelationship {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScalarType;
    use pretty_assertions::assert_eq;

    fn role_user() -> IndirectRelationship {
        IndirectRelationship::new()
            .set_pivot_table("role_user")
            .add_related_table("roles")
            .add_related_table("users")
            .add_foreign_key("roles", "role_id")
            .add_foreign_key("users", "user_id")
            .add_local_key("roles", "id")
            .add_local_key("users", "id")
    }

    #[test]
    fn test_pivot_table_unset_is_a_state_error() {
        let relationship = IndirectRelationship::new().add_related_table("roles");

        // Deterministic on every call.
        for _ in 0..3 {
            let err = relationship.pivot_table().unwrap_err();
            assert!(matches!(err, SchemaError::State { .. }));
        }
    }

    #[test]
    fn test_pivot_table_set() {
        let relationship = IndirectRelationship::new().set_pivot_table("role_user");
        assert_eq!(relationship.pivot_table().unwrap(), "role_user");
    }

    #[test]
    fn test_equality_ignores_related_table_order() {
        let a = role_user();
        let b = IndirectRelationship::new()
            .set_pivot_table("role_user")
            .add_related_table("users")
            .add_related_table("roles")
            .add_foreign_key("users", "user_id")
            .add_foreign_key("roles", "role_id")
            .add_local_key("users", "id")
            .add_local_key("roles", "id");

        assert_eq!(a, b);
    }

    #[test]
    fn test_changed_foreign_key_breaks_equality() {
        let a = role_user();
        let b = role_user().add_foreign_key("roles", "role_uuid");

        assert_ne!(a, b);
    }

    #[test]
    fn test_equality_ignores_pivot_column_order() {
        let a = role_user()
            .add_pivot_column("granted_at")
            .add_pivot_column("granted_by");
        let b = role_user()
            .add_pivot_column("granted_by")
            .add_pivot_column("granted_at");

        assert_eq!(a, b);
    }

    #[test]
    fn test_set_replaces_add_appends() {
        let relationship = IndirectRelationship::new()
            .add_related_table("roles")
            .set_related_tables(vec!["users".into()])
            .add_related_table("roles");

        assert_eq!(relationship.related_tables(), ["users", "roles"]);
    }

    #[test]
    fn test_pivot_column_attributes() {
        let attributes = vec![Column::new("granted_at", ScalarType::DateTime)];
        let relationship = role_user()
            .add_pivot_column("granted_at")
            .set_pivot_column_attributes(attributes.clone());

        assert_eq!(relationship.pivot_columns(), ["granted_at"]);
        assert_eq!(relationship.pivot_column_attributes(), attributes);
    }
}
