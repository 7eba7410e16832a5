//! Optional file based configuration for changeset generation.
use log::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{cli::Args, error::Result};

pub const DEFAULT_PACKAGES_DIR: &str = "packages";
pub const DEFAULT_OUTPUT_DIR: &str = ".changesets";

/// Configuration for repository layout and output location. Loaded from an
/// optional `changesmith.toml` at the repository root; CLI flags take
/// precedence over file values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Directory containing packages, relative to the repository root.
    pub packages_dir: String,
    /// Directory changeset files are written to, relative to the repository
    /// root.
    pub output_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            packages_dir: DEFAULT_PACKAGES_DIR.into(),
            output_dir: DEFAULT_OUTPUT_DIR.into(),
        }
    }
}

impl Config {
    /// Load configuration from the given path, falling back to defaults when
    /// the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(
                "no config file at {}: using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str::<Config>(&content)?;

        Ok(config)
    }

    /// Apply non-empty CLI flag values on top of the loaded configuration.
    pub fn apply_cli_overrides(&mut self, args: &Args) {
        if !args.packages_dir.is_empty() {
            self.packages_dir = args.packages_dir.clone();
        }

        if !args.output_dir.is_empty() {
            self.output_dir = args.output_dir.clone();
        }
    }
}
