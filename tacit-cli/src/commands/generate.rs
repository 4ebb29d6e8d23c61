//! `tacit generate` - Generate migrations from entity declarations.

use std::path::{Path, PathBuf};

use tacit_migrate::{HistoryStore, MigrationError, MigrationGenerator, WriteOutcome};
use tacit_schema::EntityDeclaration;

use crate::cli::GenerateArgs;
use crate::config::Config;
use crate::error::{CliError, CliResult};
use crate::output::{self, info, success, warn};

/// Run the generate command
pub async fn run(args: GenerateArgs) -> CliResult<()> {
    let project_root = match args.project {
        Some(path) => path,
        None => std::env::current_dir()?,
    };
    let config = Config::load_or_default(&project_root)?;

    let declarations = discover_entities(&project_root, &config, &args.entities)?;
    if declarations.is_empty() {
        warn("No entity declarations found.");
        return Ok(());
    }

    let store = history_store(&project_root, &config)?;
    let history = store.load().await?;
    let mut generator = MigrationGenerator::new(history);

    for declaration in &declarations {
        match generator.generate(declaration) {
            Ok(Some(rendered)) => match store.write(&rendered).await? {
                WriteOutcome::Created(path) => {
                    success(&format!("Created migration: {}", path.display()));
                }
                WriteOutcome::AlreadyExists(path) => {
                    warn(&format!(
                        "Migration file {} already exists. Skipping",
                        path.display()
                    ));
                }
            },
            Ok(None) => {
                info(&format!("{} has no changes.", declaration.name));
            }
            // A bad declaration aborts this entity only; the batch continues.
            Err(MigrationError::Schema(e)) => {
                output::error(&format!("{}: {}", declaration.name, e));
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

/// Scan the configured model paths for entity declarations, keeping only
/// the requested entities when names were given.
fn discover_entities(
    project_root: &Path,
    config: &Config,
    requested: &[String],
) -> CliResult<Vec<EntityDeclaration>> {
    let mut declarations = Vec::new();

    for models_dir in &config.paths.models {
        let dir = project_root.join(models_dir);
        if !dir.exists() {
            continue;
        }

        let mut paths: Vec<PathBuf> = std::fs::read_dir(&dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("toml")
            })
            .collect();
        paths.sort();

        for path in paths {
            let content = std::fs::read_to_string(&path)?;
            let declaration = EntityDeclaration::from_toml(&content).map_err(|e| {
                CliError::Declaration(format!("{}: {}", path.display(), e))
            })?;
            declarations.push(declaration);
        }
    }

    if !requested.is_empty() {
        for name in requested {
            if !declarations.iter().any(|d| d.name == name.as_str()) {
                warn(&format!("No declaration found for entity `{}`.", name));
            }
        }
        declarations.retain(|d| requested.iter().any(|name| d.name == name.as_str()));
    }

    Ok(declarations)
}

/// Build the history store: new migrations go to the first configured
/// migrations path, the rest are read-only.
fn history_store(project_root: &Path, config: &Config) -> CliResult<HistoryStore> {
    let mut paths = config.paths.migrations.iter();
    let primary = paths
        .next()
        .ok_or_else(|| CliError::Config("no migrations path configured".to_string()))?;

    let mut store = HistoryStore::new(project_root.join(primary));
    for extra in paths {
        store = store.with_path(project_root.join(extra));
    }
    Ok(store)
}
