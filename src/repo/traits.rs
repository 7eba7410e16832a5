//! Trait abstraction over version-control queries.
//!
//! The pipeline only ever talks to git through this trait so that the
//! attribution and classification logic can be tested against a mock
//! history without a real repository.

use crate::error::Result;

/// Minimal commit record returned by history queries. Changed files are
/// fetched separately per commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    /// Full commit hash.
    pub hash: String,
    /// First line of the commit message.
    pub subject: String,
}

/// Read-only queries against a version-control repository.
#[cfg_attr(test, mockall::automock)]
pub trait GitQuery {
    /// Non-merge commits reachable from `upper` but not from `lower`, in the
    /// repository's native order (most recent first).
    fn list_commits(&self, lower: &str, upper: &str) -> Result<Vec<CommitInfo>>;

    /// Paths changed by a commit relative to its first parent. Root commits
    /// report every path in their tree.
    fn changed_files(&self, hash: &str) -> Result<Vec<String>>;

    /// Most recent common ancestor of two refs.
    fn merge_base(&self, a: &str, b: &str) -> Result<String>;

    /// Configured upstream ref of a local branch, if any
    /// (e.g. "main" -> "origin/main").
    fn upstream_ref(&self, branch: &str) -> Option<String>;

    /// Whether a ref name resolves in this repository.
    fn ref_exists(&self, reference: &str) -> bool;
}
