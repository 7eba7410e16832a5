//! End-to-end changeset generation pipeline.
//!
//! Runs the stages in strict order: package discovery, range resolution,
//! history loading, attribution, classification, rendering, and writing.
//! Per-package write failures are collected rather than propagated so one
//! bad package cannot block the rest.

use log::*;
use std::path::{Path, PathBuf};

use crate::{
    attribution,
    classifier,
    cli::Invocation,
    config::Config,
    error::Result,
    history::CommitHistoryLoader,
    range::RangeResolver,
    registry::PackageRegistry,
    renderer,
    repo::traits::GitQuery,
    writer::ChangesetWriter,
};

/// Final status of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every affected package got a changeset file.
    Success,
    /// One or more packages failed to write; the rest were processed.
    PartialSuccess,
    /// No commits in the resolved range; nothing to generate.
    NoCommits,
}

/// Outcome of a generation run.
#[derive(Debug)]
pub struct RunReport {
    pub status: RunStatus,
    /// Paths of changeset files written this run.
    pub written: Vec<PathBuf>,
    /// Names of packages whose changeset could not be persisted.
    pub failed_packages: Vec<String>,
}

/// Generate one changeset file per package affected by the commits between
/// the resolved target branch and the source branch.
pub fn generate(
    git: &dyn GitQuery,
    invocation: &Invocation,
    config: &Config,
    repo_root: &Path,
) -> Result<RunReport> {
    let registry = PackageRegistry::new(repo_root, &config.packages_dir);
    let packages = registry.discover()?;

    let resolver = RangeResolver::new(git);
    let range = resolver.resolve(
        &invocation.source_branch,
        invocation.target_branch.as_deref(),
    );

    let loader = CommitHistoryLoader::new(git);
    let commits =
        loader.load(&range.lower_bound, &invocation.source_branch)?;

    if commits.is_empty() {
        info!(
            "no commits between {} and {}: nothing to generate",
            range.target_branch, invocation.source_branch
        );
        return Ok(RunReport {
            status: RunStatus::NoCommits,
            written: vec![],
            failed_packages: vec![],
        });
    }

    let changes = attribution::attribute(&commits, &packages);

    let writer = ChangesetWriter::new(&repo_root.join(&config.output_dir));

    let mut written: Vec<PathBuf> = vec![];
    let mut failed_packages: Vec<String> = vec![];

    for package_changes in &changes {
        let changeset = classifier::classify(package_changes);

        let document = renderer::render(
            &changeset,
            invocation.related_link.as_deref(),
        )?;

        match writer.write(&changeset.package, invocation.pr_number, &document)
        {
            Ok(path) => written.push(path),
            Err(err) => {
                error!(
                    "failed to write changeset for {}: {err}",
                    changeset.package
                );
                failed_packages.push(changeset.package.clone());
            }
        }
    }

    let status = if failed_packages.is_empty() {
        RunStatus::Success
    } else {
        RunStatus::PartialSuccess
    };

    Ok(RunReport {
        status,
        written,
        failed_packages,
    })
}

#[cfg(test)]
mod tests;
