//! Attribution of commits to the packages whose file trees they modified.

use log::*;
use std::path::Path;

use crate::{history::Commit, registry::Package};

/// A commit attributed to one package, with the subset of its changed files
/// under that package's root path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributedCommit {
    pub commit: Commit,
    pub matched_files: Vec<String>,
}

/// All commits attributed to one package, in range order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageChanges {
    pub package: Package,
    pub commits: Vec<AttributedCommit>,
}

/// Map each commit to the packages whose root path prefixes any of its
/// changed files. A commit may land in zero, one, or many packages; commits
/// touching only paths outside every package root attach nowhere. Packages
/// with no attributed commits are omitted from the result.
pub fn attribute(
    commits: &[Commit],
    packages: &[Package],
) -> Vec<PackageChanges> {
    let mut changes: Vec<PackageChanges> = vec![];

    for package in packages {
        let package_root = Path::new(&package.root_path);

        let mut attributed: Vec<AttributedCommit> = vec![];

        for commit in commits {
            let matched_files: Vec<String> = commit
                .changed_files
                .iter()
                .filter(|file| Path::new(file).starts_with(package_root))
                .cloned()
                .collect();

            if matched_files.is_empty() {
                continue;
            }

            debug!(
                "{}: including commit {} : {}",
                package.name, commit.hash, commit.subject
            );

            attributed.push(AttributedCommit {
                commit: commit.clone(),
                matched_files,
            });
        }

        if !attributed.is_empty() {
            changes.push(PackageChanges {
                package: package.clone(),
                commits: attributed,
            });
        }
    }

    changes
}
