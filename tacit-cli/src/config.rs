//! CLI configuration handling.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CliResult;

/// Default config file name (lives in project root)
pub const CONFIG_FILE_NAME: &str = "tacit.toml";

/// Default entity declaration directory
pub const MODELS_DIR: &str = "models";

/// Default migrations directory
pub const MIGRATIONS_DIR: &str = "migrations";

/// Tacit CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source and history locations
    pub paths: PathsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the project configuration, falling back to defaults when no
    /// config file exists
    pub fn load_or_default(project_root: &Path) -> CliResult<Self> {
        let path = project_root.join(CONFIG_FILE_NAME);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> CliResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Source and history locations, relative to the project root
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directories scanned for entity declarations
    pub models: Vec<PathBuf>,

    /// Migration history locations; new migrations go to the first
    pub migrations: Vec<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            models: vec![PathBuf::from(MODELS_DIR)],
            migrations: vec![PathBuf::from(MIGRATIONS_DIR)],
        }
    }
}
