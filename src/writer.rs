//! Changeset file persistence.

use log::*;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Writes changeset documents under the output directory, one file per
/// affected package, deterministically named by `(pr number, sanitized
/// package name)`.
pub struct ChangesetWriter {
    output_dir: PathBuf,
}

impl ChangesetWriter {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
        }
    }

    /// Fully overwrite the changeset file for this package and PR.
    /// Re-running after new commits land on the same PR replaces the file
    /// instead of accumulating stale entries.
    pub fn write(
        &self,
        package_name: &str,
        pr_number: u64,
        document: &str,
    ) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;

        let file_name =
            format!("{pr_number}-{}.md", sanitize_package_name(package_name));
        let path = self.output_dir.join(file_name);

        std::fs::write(&path, document)?;

        info!("wrote changeset for {package_name} to {}", path.display());

        Ok(path)
    }
}

/// Strip or replace characters disallowed in file names: the leading `@` of
/// scoped names is dropped, `/` becomes `__`, and anything outside
/// `[A-Za-z0-9._-]` becomes `_`.
pub fn sanitize_package_name(name: &str) -> String {
    name.strip_prefix('@')
        .unwrap_or(name)
        .replace('/', "__")
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_scoped_package_names() {
        assert_eq!(sanitize_package_name("@acme/ui"), "acme__ui");
        assert_eq!(sanitize_package_name("core"), "core");
        assert_eq!(sanitize_package_name("my pkg#1"), "my_pkg_1");
    }

    #[test]
    fn writes_deterministically_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ChangesetWriter::new(dir.path());

        let path = writer.write("@acme/ui", 42, "document\n").unwrap();

        assert_eq!(path, dir.path().join("42-acme__ui.md"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "document\n");
    }

    #[test]
    fn overwrites_existing_file_fully() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ChangesetWriter::new(dir.path());

        writer.write("ui", 42, "first version\n").unwrap();
        let path = writer.write("ui", 42, "second\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second\n");
    }

    #[test]
    fn creates_output_directory_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join(".changesets");
        let writer = ChangesetWriter::new(&nested);

        let path = writer.write("ui", 7, "document\n").unwrap();

        assert!(path.exists());
    }
}
