//! Package discovery for multi-package repositories.
//!
//! A package is an immediate subdirectory of the packages root containing a
//! recognized manifest file. Manifest parsing is best effort: the package
//! name falls back to the directory name when the manifest has no usable
//! name field.

use log::*;
use std::path::{Path, PathBuf};

use crate::error::{ChangesmithError, Result};

/// A discovered package and its repository-relative root path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// Unique package name from the manifest (or the directory name).
    pub name: String,
    /// Package root path relative to the repository root, using `/`
    /// separators.
    pub root_path: String,
}

/// Discovers packages under a configured directory of the repository.
pub struct PackageRegistry {
    repo_root: PathBuf,
    packages_dir: String,
}

impl PackageRegistry {
    pub fn new(repo_root: &Path, packages_dir: &str) -> Self {
        Self {
            repo_root: repo_root.to_path_buf(),
            packages_dir: packages_dir.trim_matches('/').to_string(),
        }
    }

    /// Scan immediate subdirectories of the packages root for manifests.
    /// Fails with [`ChangesmithError::NoPackagesFound`] when nothing
    /// qualifies, since there is nothing to attribute commits to.
    pub fn discover(&self) -> Result<Vec<Package>> {
        let root = self.repo_root.join(&self.packages_dir);

        let mut packages: Vec<Package> = vec![];

        if root.is_dir() {
            for entry in std::fs::read_dir(&root)? {
                let entry = entry?;
                let path = entry.path();

                if !path.is_dir() {
                    continue;
                }

                let dir_name =
                    entry.file_name().to_string_lossy().to_string();

                let Some(name) = read_package_name(&path, &dir_name) else {
                    debug!("skipping {dir_name}: no recognized manifest");
                    continue;
                };

                packages.push(Package {
                    name,
                    root_path: self.root_path_for(&dir_name),
                });
            }
        }

        if packages.is_empty() {
            return Err(ChangesmithError::NoPackagesFound(
                self.packages_dir.clone(),
            ));
        }

        info!(
            "discovered {} packages under {}",
            packages.len(),
            self.packages_dir
        );

        Ok(packages)
    }

    fn root_path_for(&self, dir_name: &str) -> String {
        if self.packages_dir.is_empty() || self.packages_dir == "." {
            return dir_name.to_string();
        }

        format!("{}/{}", self.packages_dir, dir_name)
    }
}

/// Read the package name from a recognized manifest in `dir`. Returns None
/// when no manifest exists; unparseable manifests still qualify the
/// directory but fall back to the directory name.
fn read_package_name(dir: &Path, dir_name: &str) -> Option<String> {
    let package_json = dir.join("package.json");
    if package_json.is_file() {
        return Some(
            node_package_name(&package_json)
                .unwrap_or_else(|| dir_name.to_string()),
        );
    }

    let cargo_toml = dir.join("Cargo.toml");
    if cargo_toml.is_file() {
        return Some(
            cargo_package_name(&cargo_toml)
                .unwrap_or_else(|| dir_name.to_string()),
        );
    }

    None
}

fn node_package_name(manifest: &Path) -> Option<String> {
    let content = std::fs::read_to_string(manifest).ok()?;

    match serde_json::from_str::<serde_json::Value>(&content) {
        Ok(value) => value
            .get("name")
            .and_then(|n| n.as_str())
            .map(|n| n.to_string()),
        Err(err) => {
            warn!("failed to parse {}: {err}", manifest.display());
            None
        }
    }
}

fn cargo_package_name(manifest: &Path) -> Option<String> {
    let content = std::fs::read_to_string(manifest).ok()?;

    match toml::from_str::<toml::Value>(&content) {
        Ok(value) => value
            .get("package")
            .and_then(|p| p.get("name"))
            .and_then(|n| n.as_str())
            .map(|n| n.to_string()),
        Err(err) => {
            warn!("failed to parse {}: {err}", manifest.display());
            None
        }
    }
}
