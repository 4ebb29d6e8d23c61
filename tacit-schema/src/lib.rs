//! # tacit-schema
//!
//! Entity declarations and schema extraction for Tacit.
//!
//! This crate provides the data model the migration engine diffs over:
//! columns, direct (foreign-key) and indirect (pivot-table) relationships,
//! and [`TableShape`] — the normalized structure of one table at one
//! logical point in time. The [`extract`] module turns an
//! [`EntityDescription`] into the shapes the entity currently declares,
//! including the pivot tables its indirect relationships require.
//!
//! ```rust
//! use tacit_schema::{EntityDeclaration, extract_shapes};
//!
//! let user = EntityDeclaration::from_toml(r#"
//!     name  = "User"
//!     table = "users"
//!
//!     [[columns]]
//!     name = "id"
//!     type = "int"
//!
//!     [[relationships]]
//!     kind           = "indirect"
//!     pivot_table    = "role_user"
//!     related_tables = ["roles"]
//!     foreign_keys   = { roles = "role_id", users = "user_id" }
//! "#)?;
//!
//! let shapes = extract_shapes(&user)?;
//! assert_eq!(shapes.len(), 2); // `users` plus the `role_user` pivot
//! # Ok::<(), tacit_schema::SchemaError>(())
//! ```

pub mod column;
pub mod declaration;
pub mod error;
pub mod extract;
pub mod relationship;
pub mod shape;
pub mod types;

// Re-exports
pub use column::Column;
pub use declaration::{EntityDeclaration, EntityDescription, RelationshipDeclaration};
pub use error::{SchemaError, SchemaResult};
pub use extract::extract_shapes;
pub use relationship::{DirectRelationship, IndirectRelationship};
pub use shape::TableShape;
pub use types::ScalarType;
