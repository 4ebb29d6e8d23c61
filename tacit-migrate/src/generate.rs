//! The delta generator: reconstruct, extract, diff, render.

use tracing::debug;

use tacit_schema::{EntityDescription, extract_shapes};

use crate::artifact::{ArtifactIdGenerator, MigrationArtifact, RenderedArtifact};
use crate::diff::diff_table;
use crate::error::MigrateResult;
use crate::reconstruct::reconstruct;

/// Generates migration artifacts holding exactly the delta between an
/// entity's declared shape and the cumulative effect of history.
///
/// The history snapshot is loaded once and read-only; each generation run
/// re-folds it, trading recomputation for freedom from stale-cache bugs.
pub struct MigrationGenerator {
    history: Vec<MigrationArtifact>,
    ids: ArtifactIdGenerator,
}

impl MigrationGenerator {
    /// Create a generator over a history snapshot. The artifacts are
    /// sorted by identifier, so the result is independent of the order
    /// the history store enumerated them in.
    pub fn new(mut history: Vec<MigrationArtifact>) -> Self {
        history.sort_by(|a, b| a.id.cmp(&b.id));
        Self {
            history,
            ids: ArtifactIdGenerator::new(),
        }
    }

    /// The history snapshot, in application order.
    pub fn history(&self) -> &[MigrationArtifact] {
        &self.history
    }

    /// Generate a migration for one entity.
    ///
    /// Returns `Ok(None)` when the declared shape matches the last-known
    /// shape — the caller must not create a file in that case. Extractor
    /// and reconstructor failures propagate unchanged; no partial artifact
    /// is ever returned.
    pub fn generate(
        &mut self,
        entity: &dyn EntityDescription,
    ) -> MigrateResult<Option<RenderedArtifact>> {
        let shapes = extract_shapes(entity)?;
        let last_known = reconstruct(&self.history)?;

        let mut operations = Vec::new();
        for shape in shapes {
            let diff = diff_table(&shape, last_known.get(shape.table_name()));
            if !diff.is_empty() {
                debug!(
                    entity = entity.entity_name(),
                    table = shape.table_name(),
                    summary = %diff.summary(),
                    "table shape changed"
                );
                operations.extend(diff.into_operations());
            }
        }

        if operations.is_empty() {
            debug!(entity = entity.entity_name(), "no changes");
            return Ok(None);
        }

        let id = self.ids.next_id(entity.table_name());
        let artifact = MigrationArtifact::new(id.clone(), operations);
        let body = artifact.render()?;

        Ok(Some(RenderedArtifact {
            file_name: format!("{}.toml", id),
            id,
            body,
        }))
    }
}
