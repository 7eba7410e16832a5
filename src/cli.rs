//! CLI argument parsing and invocation resolution.
use clap::Parser;
use url::Url;

use crate::error::{ChangesmithError, Result};

pub const DEFAULT_CONFIG_PATH: &str = "changesmith.toml";

/// CLI arguments for changeset generation.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Positional inputs: [related-url] <source-branch> [target-branch] [pr-number].
    /// The related URL is recognized by an http(s):// prefix. A numeric
    /// positional is taken as the PR number; when omitted it is derived from
    /// the trailing path segment of the related URL.
    #[arg(required = true, num_args = 1..=4)]
    pub inputs: Vec<String>,

    #[arg(long, default_value = "")]
    /// Directory containing packages, relative to the repository root.
    /// Overrides the config file value.
    pub packages_dir: String,

    #[arg(long, default_value = "")]
    /// Directory changeset files are written to, relative to the repository
    /// root. Overrides the config file value.
    pub output_dir: String,

    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    /// Path to the changesmith config file.
    pub config: String,

    #[arg(long, default_value_t = false)]
    /// Enable debug logging.
    pub debug: bool,
}

/// Resolved invocation after interpreting the positional inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Optional related-change link included at the bottom of each changeset.
    pub related_link: Option<String>,
    /// Branch whose new commits are analyzed.
    pub source_branch: String,
    /// Explicit target branch override.
    pub target_branch: Option<String>,
    /// PR identifier used in output file names.
    pub pr_number: u64,
}

impl Args {
    /// Interpret the positional inputs into a structured invocation.
    pub fn invocation(&self) -> Result<Invocation> {
        let mut inputs = self.inputs.iter().peekable();

        let mut related_link: Option<Url> = None;

        if let Some(first) = inputs.peek()
            && (first.starts_with("http://") || first.starts_with("https://"))
        {
            related_link = Some(Url::parse(first.as_str())?);
            inputs.next();
        }

        let source_branch = inputs
            .next()
            .ok_or_else(|| {
                ChangesmithError::invalid_args("missing source branch")
            })?
            .to_string();

        let mut target_branch: Option<String> = None;
        let mut pr_number: Option<u64> = None;

        for arg in inputs {
            if pr_number.is_none()
                && let Ok(number) = arg.parse::<u64>()
            {
                pr_number = Some(number);
            } else if target_branch.is_none() {
                target_branch = Some(arg.to_string());
            } else {
                return Err(ChangesmithError::invalid_args(format!(
                    "unexpected argument: {arg}"
                )));
            }
        }

        if pr_number.is_none()
            && let Some(link) = &related_link
        {
            pr_number = trailing_pr_number(link);
        }

        let pr_number = pr_number.ok_or_else(|| {
            ChangesmithError::invalid_args("missing PR identifier")
        })?;

        Ok(Invocation {
            related_link: related_link.map(|u| u.to_string()),
            source_branch,
            target_branch,
            pr_number,
        })
    }
}

/// Extract a PR number from the trailing path segment of a URL
/// (e.g. https://github.com/owner/repo/pull/42 -> 42).
fn trailing_pr_number(url: &Url) -> Option<u64> {
    url.path_segments()?
        .filter(|segment| !segment.is_empty())
        .next_back()?
        .parse::<u64>()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_with_inputs(inputs: &[&str]) -> Args {
        Args {
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            packages_dir: "".into(),
            output_dir: "".into(),
            config: DEFAULT_CONFIG_PATH.into(),
            debug: false,
        }
    }

    #[test]
    fn resolves_source_and_explicit_pr_number() {
        let args = args_with_inputs(&["feature/login", "42"]);
        let invocation = args.invocation().unwrap();

        assert_eq!(invocation.source_branch, "feature/login");
        assert_eq!(invocation.pr_number, 42);
        assert_eq!(invocation.target_branch, None);
        assert_eq!(invocation.related_link, None);
    }

    #[test]
    fn resolves_full_invocation() {
        let args = args_with_inputs(&[
            "https://github.com/owner/repo/pull/7",
            "feature/login",
            "main",
            "7",
        ]);
        let invocation = args.invocation().unwrap();

        assert_eq!(invocation.source_branch, "feature/login");
        assert_eq!(invocation.target_branch, Some("main".into()));
        assert_eq!(invocation.pr_number, 7);
        assert_eq!(
            invocation.related_link,
            Some("https://github.com/owner/repo/pull/7".into())
        );
    }

    #[test]
    fn derives_pr_number_from_url_trailing_segment() {
        let args = args_with_inputs(&[
            "https://github.com/owner/repo/pull/123",
            "feature/login",
        ]);
        let invocation = args.invocation().unwrap();

        assert_eq!(invocation.pr_number, 123);
    }

    #[test]
    fn fails_without_pr_number() {
        let args = args_with_inputs(&["feature/login", "main"]);
        let result = args.invocation();

        assert!(matches!(
            result,
            Err(ChangesmithError::InvalidArgs(_))
        ));
    }

    #[test]
    fn fails_without_pr_number_when_url_has_no_numeric_segment() {
        let args = args_with_inputs(&[
            "https://github.com/owner/repo",
            "feature/login",
        ]);
        let result = args.invocation();

        assert!(matches!(
            result,
            Err(ChangesmithError::InvalidArgs(_))
        ));
    }

    #[test]
    fn fails_on_extra_positional() {
        let args =
            args_with_inputs(&["feature/login", "main", "develop", "42"]);
        let result = args.invocation();

        assert!(matches!(
            result,
            Err(ChangesmithError::InvalidArgs(_))
        ));
    }
}
