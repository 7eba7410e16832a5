//! Commit history loading for the resolved comparison range.

use log::*;

use crate::{error::Result, repo::traits::GitQuery};

/// A non-merge commit in the comparison range with its changed file paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub hash: String,
    pub subject: String,
    pub changed_files: Vec<String>,
}

/// Loads the ordered commit list and per-commit changed files.
pub struct CommitHistoryLoader<'a> {
    git: &'a dyn GitQuery,
}

impl<'a> CommitHistoryLoader<'a> {
    pub fn new(git: &'a dyn GitQuery) -> Self {
        Self { git }
    }

    /// Load non-merge commits in `lower..upper`, preserving the native
    /// most-recent-first order. A failed file-list query degrades to an
    /// empty list for that commit rather than aborting the run. An empty
    /// result is not an error: it signals nothing to generate.
    pub fn load(&self, lower: &str, upper: &str) -> Result<Vec<Commit>> {
        let infos = self.git.list_commits(lower, upper)?;

        info!("found {} commits in range {lower}..{upper}", infos.len());

        let mut commits: Vec<Commit> = vec![];

        for info in infos {
            let changed_files = match self.git.changed_files(&info.hash) {
                Ok(files) => files,
                Err(err) => {
                    warn!(
                        "failed to list changed files for {}: {err}: \
                         treating as empty",
                        info.hash
                    );
                    vec![]
                }
            };

            commits.push(Commit {
                hash: info.hash,
                subject: info.subject,
                changed_files,
            });
        }

        Ok(commits)
    }
}
