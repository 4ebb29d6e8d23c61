//! History store: reading and writing migration artifacts on disk.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::artifact::{MigrationArtifact, RenderedArtifact};
use crate::error::MigrateResult;

/// Outcome of writing a rendered artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The artifact was written to this path.
    Created(PathBuf),
    /// The target already existed and was left untouched.
    AlreadyExists(PathBuf),
}

/// A read-mostly store of migration artifacts across one or more history
/// locations. New artifacts are written to the primary location.
pub struct HistoryStore {
    primary: PathBuf,
    extra: Vec<PathBuf>,
}

impl HistoryStore {
    /// Create a store writing to `primary`.
    pub fn new(primary: impl Into<PathBuf>) -> Self {
        Self {
            primary: primary.into(),
            extra: Vec::new(),
        }
    }

    /// Add an additional read-only history location.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.extra.push(path.into());
        self
    }

    /// The location new artifacts are written to.
    pub fn primary_path(&self) -> &Path {
        &self.primary
    }

    /// Load every artifact across all history locations, sorted by
    /// identifier. Files that do not parse as artifacts are skipped; the
    /// identifier comes from the file stem, so sorting never needs to
    /// parse a body.
    pub async fn load(&self) -> MigrateResult<Vec<MigrationArtifact>> {
        let mut artifacts = Vec::new();

        for dir in std::iter::once(&self.primary).chain(&self.extra) {
            if !dir.exists() {
                continue;
            }

            let mut entries = tokio::fs::read_dir(dir).await?;
            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("toml") {
                    continue;
                }
                let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };

                let body = tokio::fs::read_to_string(&path).await?;
                match MigrationArtifact::from_toml(id, &body) {
                    Some(artifact) => artifacts.push(artifact),
                    None => debug!(path = %path.display(), "skipping non-artifact file"),
                }
            }
        }

        artifacts.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(artifacts)
    }

    /// Write a rendered artifact to the primary location.
    ///
    /// A pre-existing target file is skipped, never overwritten: another
    /// process already generated this migration.
    pub async fn write(&self, rendered: &RenderedArtifact) -> MigrateResult<WriteOutcome> {
        tokio::fs::create_dir_all(&self.primary).await?;

        let target = self.primary.join(&rendered.file_name);
        if target.exists() {
            warn!(path = %target.display(), "migration file already exists");
            return Ok(WriteOutcome::AlreadyExists(target));
        }

        tokio::fs::write(&target, &rendered.body).await?;
        Ok(WriteOutcome::Created(target))
    }
}
