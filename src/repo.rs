//! Git repository operations backed by git2.
//!
//! Implements the [`traits::GitQuery`] interface used by the changeset
//! pipeline: range walks, per-commit file lists, merge-base computation,
//! upstream lookup, and ref existence checks. All queries are read-only.

use color_eyre::eyre::eyre;
use git2::{BranchType, Oid, Sort};
use log::*;
use std::path::{Path, PathBuf};

use crate::{
    error::Result,
    repo::traits::{CommitInfo, GitQuery},
};

pub mod traits;

/// Local repository handle for read-only history queries.
pub struct Repository {
    repo: git2::Repository,
}

impl Repository {
    /// Open the repository containing `path`, searching parent directories
    /// the way the git CLI does.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = git2::Repository::discover(path)?;
        Ok(Self { repo })
    }

    /// The repository's working directory.
    pub fn workdir(&self) -> Result<PathBuf> {
        self.repo
            .workdir()
            .map(|p| p.to_path_buf())
            .ok_or_else(|| eyre!("repository has no working directory").into())
    }

    fn resolve_commit_id(&self, reference: &str) -> Result<Oid> {
        let object = self.repo.revparse_single(reference)?;
        let commit = object.peel_to_commit()?;
        Ok(commit.id())
    }
}

impl GitQuery for Repository {
    fn list_commits(&self, lower: &str, upper: &str) -> Result<Vec<CommitInfo>> {
        debug!("listing commits in range {lower}..{upper}");

        let upper_id = self.resolve_commit_id(upper)?;
        let lower_id = self.resolve_commit_id(lower)?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::NONE)?;
        revwalk.push(upper_id)?;
        revwalk.hide(lower_id)?;

        let mut commits: Vec<CommitInfo> = vec![];

        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;

            if commit.parent_count() > 1 {
                // merge commits carry no attributable change of their own
                continue;
            }

            commits.push(CommitInfo {
                hash: commit.id().to_string(),
                subject: commit.summary().unwrap_or("").to_string(),
            });
        }

        Ok(commits)
    }

    fn changed_files(&self, hash: &str) -> Result<Vec<String>> {
        let oid = Oid::from_str(hash)?;
        let commit = self.repo.find_commit(oid)?;
        let tree = commit.tree()?;

        let parent_tree = if commit.parent_count() > 0 {
            Some(commit.parent(0)?.tree()?)
        } else {
            None
        };

        let diff = self.repo.diff_tree_to_tree(
            parent_tree.as_ref(),
            Some(&tree),
            None,
        )?;

        let mut files: Vec<String> = vec![];

        for delta in diff.deltas() {
            let path = delta
                .new_file()
                .path()
                .or_else(|| delta.old_file().path());

            if let Some(path) = path
                && let Some(path) = path.to_str()
            {
                files.push(path.to_string());
            }
        }

        Ok(files)
    }

    fn merge_base(&self, a: &str, b: &str) -> Result<String> {
        let a_id = self.resolve_commit_id(a)?;
        let b_id = self.resolve_commit_id(b)?;
        let base = self.repo.merge_base(a_id, b_id)?;
        Ok(base.to_string())
    }

    fn upstream_ref(&self, branch: &str) -> Option<String> {
        let local = self.repo.find_branch(branch, BranchType::Local).ok()?;
        let upstream = local.upstream().ok()?;
        let name = upstream.name().ok()??;
        Some(name.to_string())
    }

    fn ref_exists(&self, reference: &str) -> bool {
        self.repo.revparse_single(reference).is_ok()
    }
}
