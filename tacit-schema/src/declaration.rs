//! Entity declarations: the normalized description of an entity's fields
//! and relationship annotations.
//!
//! How a description is produced is up to the host environment; this crate
//! only requires the [`EntityDescription`] capability set. The bundled
//! [`EntityDeclaration`] implementation is a plain declarative document:
//!
//! ```toml
//! name  = "User"
//! table = "users"
//!
//! [[columns]]
//! name = "id"
//! type = "int"
//!
//! [[relationships]]
//! kind           = "indirect"
//! pivot_table    = "role_user"
//! related_tables = ["roles"]
//! foreign_keys   = { roles = "role_id", users = "user_id" }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::column::Column;
use crate::error::{SchemaError, SchemaResult};

/// Capability set the schema extractor needs from an entity declaration.
pub trait EntityDescription {
    /// The entity's declared name.
    fn entity_name(&self) -> &str;

    /// The table the entity persists to.
    fn table_name(&self) -> &str;

    /// The declared columns.
    fn columns(&self) -> &[Column];

    /// The declared relationship annotations.
    fn relationships(&self) -> &[RelationshipDeclaration];
}

/// A declared relationship annotation on an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RelationshipDeclaration {
    /// Single foreign-key reference to another table.
    Direct {
        /// Referenced table.
        related_table: SmolStr,
        /// Foreign-key column on this entity's table.
        foreign_key: SmolStr,
        /// Referenced column on the related table.
        #[serde(default = "default_local_key")]
        local_key: SmolStr,
    },
    /// Many-to-many association via a pivot table.
    Indirect {
        /// Pivot table name; derived from the participating tables when
        /// omitted.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pivot_table: Option<SmolStr>,
        /// Related tables (the entity's own table is always a participant).
        related_tables: Vec<SmolStr>,
        /// Foreign-key column on the pivot, per participating table.
        #[serde(default)]
        foreign_keys: BTreeMap<SmolStr, SmolStr>,
        /// Referenced column per participating table; defaults to `id`.
        #[serde(default)]
        local_keys: BTreeMap<SmolStr, SmolStr>,
        /// Extra columns carried on the pivot table.
        #[serde(default)]
        pivot_columns: Vec<Column>,
    },
}

fn default_local_key() -> SmolStr {
    SmolStr::new_static("id")
}

/// A declarative entity description parsed from a TOML document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDeclaration {
    /// Entity name.
    pub name: SmolStr,
    /// Target table name.
    pub table: SmolStr,
    /// Declared columns.
    #[serde(default)]
    pub columns: Vec<Column>,
    /// Declared relationships.
    #[serde(default)]
    pub relationships: Vec<RelationshipDeclaration>,
}

impl EntityDeclaration {
    /// Parse a declaration from a TOML document.
    pub fn from_toml(content: &str) -> SchemaResult<Self> {
        toml::from_str(content).map_err(|source| SchemaError::TomlError { source })
    }
}

impl EntityDescription for EntityDeclaration {
    fn entity_name(&self) -> &str {
        &self.name
    }

    fn table_name(&self) -> &str {
        &self.table
    }

    fn columns(&self) -> &[Column] {
        &self.columns
    }

    fn relationships(&self) -> &[RelationshipDeclaration] {
        &self.relationships
    }
}
