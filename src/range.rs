//! Comparison-range resolution between a source branch and its target.

use log::*;

use crate::repo::traits::GitQuery;

/// Ordered candidates probed when no explicit target or configured upstream
/// is available.
pub const TARGET_CANDIDATES: [&str; 4] =
    ["origin/main", "main", "origin/master", "master"];

/// Last-resort target when nothing resolves.
pub const FALLBACK_TARGET: &str = "origin/main";

/// Resolved comparison range for history loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRange {
    /// Branch the source branch is compared against.
    pub target_branch: String,
    /// Lower bound of the commit range: the merge-base of target and source,
    /// or the target branch itself when the merge-base is unavailable.
    pub lower_bound: String,
}

/// Determines the target branch and the lower bound of the commit range.
pub struct RangeResolver<'a> {
    git: &'a dyn GitQuery,
}

impl<'a> RangeResolver<'a> {
    pub fn new(git: &'a dyn GitQuery) -> Self {
        Self { git }
    }

    /// Resolve the comparison range. Never fails: a missing merge-base
    /// widens the range to the target branch instead of aborting.
    pub fn resolve(
        &self,
        source_branch: &str,
        target_override: Option<&str>,
    ) -> ResolvedRange {
        let target_branch = self.resolve_target(source_branch, target_override);

        let lower_bound = match self
            .git
            .merge_base(&target_branch, source_branch)
        {
            Ok(base) => base,
            Err(err) => {
                warn!(
                    "failed to compute merge-base of {target_branch} and \
                     {source_branch}: {err}: comparing against \
                     {target_branch} directly"
                );
                target_branch.clone()
            }
        };

        debug!(
            "resolved range: target {target_branch}, lower bound {lower_bound}"
        );

        ResolvedRange {
            target_branch,
            lower_bound,
        }
    }

    fn resolve_target(
        &self,
        source_branch: &str,
        target_override: Option<&str>,
    ) -> String {
        if let Some(target) = target_override {
            return target.to_string();
        }

        if let Some(upstream) = self.git.upstream_ref(source_branch) {
            debug!("using configured upstream {upstream} as target branch");
            return upstream;
        }

        for candidate in TARGET_CANDIDATES {
            if self.git.ref_exists(candidate) {
                debug!("using {candidate} as target branch");
                return candidate.to_string();
            }
        }

        warn!("no target branch resolved: defaulting to {FALLBACK_TARGET}");

        FALLBACK_TARGET.to_string()
    }
}
