//! # tacit-migrate
//!
//! Migration engine for Tacit: infers schema migrations from entity
//! declarations and emits only the incremental delta.
//!
//! The engine never talks to a database. The sole source of truth for
//! "what has already been emitted" is the ordered history of migration
//! artifacts on disk:
//!
//! ```text
//! ┌─────────────────┐     ┌───────────────┐
//! │ History store   │────▶│ Reconstructor │──▶ last-known shapes
//! └─────────────────┘     └───────────────┘          │
//! ┌─────────────────┐     ┌───────────────┐          ▼
//! │ Entity          │────▶│ Extractor     │──▶ declared shapes ──▶ diff
//! │ declaration     │     └───────────────┘          │
//! └─────────────────┘                                ▼
//!                                        rendered artifact, or "no changes"
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use tacit_migrate::{HistoryStore, MigrationGenerator, WriteOutcome};
//! use tacit_schema::EntityDeclaration;
//!
//! async fn generate(entity: &EntityDeclaration) -> Result<(), Box<dyn std::error::Error>> {
//!     let store = HistoryStore::new("migrations");
//!     let mut generator = MigrationGenerator::new(store.load().await?);
//!
//!     match generator.generate(entity)? {
//!         Some(rendered) => match store.write(&rendered).await? {
//!             WriteOutcome::Created(path) => println!("Created migration: {}", path.display()),
//!             WriteOutcome::AlreadyExists(path) => {
//!                 println!("Migration file {} already exists. Skipping", path.display())
//!             }
//!         },
//!         None => println!("{} has no changes.", entity.name),
//!     }
//!     Ok(())
//! }
//! ```

pub mod artifact;
pub mod diff;
pub mod error;
pub mod generate;
pub mod history;
pub mod reconstruct;

// Re-exports
pub use artifact::{ArtifactIdGenerator, MigrationArtifact, RenderedArtifact, SchemaOperation};
pub use diff::{TableDiff, diff_table};
pub use error::{MigrateResult, MigrationError};
pub use generate::MigrationGenerator;
pub use history::{HistoryStore, WriteOutcome};
pub use reconstruct::reconstruct;
