//! Commit classification: version bump derivation and category bucketing.
//!
//! Classification is deliberate string matching rather than full
//! conventional-commit parsing. The bump rule treats any `!:` occurrence in
//! a subject as breaking, so a subject like `fix: re-enable a!:b flag`
//! triggers a major bump. This false positive is a known property of the
//! matching rules, kept for parity with how changeset tooling interprets
//! subjects.

use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use crate::attribution::PackageChanges;

const BREAKING_TOKEN: &str = "BREAKING CHANGE";
const BREAKING_MARKER: &str = "!:";

// The minor bump rule tests the bare type token as a prefix.
static FEAT_SUBJECT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^feat").unwrap());

// Category rules require the `:` so that marker-carrying subjects such as
// `fix!:` fall through to Others verbatim.
static FEAT_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^feat:\s*").unwrap());
static FIX_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^fix:\s*").unwrap());
static REFACTOR_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^refactor:\s*").unwrap());
static PERF_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^perf:\s*").unwrap());
static DOCS_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^docs:\s*").unwrap());
static CHORE_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^chore:\s*").unwrap());

/// Recommended semantic-version bump, totally ordered patch < minor < major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Bump {
    Patch,
    Minor,
    Major,
}

impl fmt::Display for Bump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bump::Patch => write!(f, "patch"),
            Bump::Minor => write!(f, "minor"),
            Bump::Major => write!(f, "major"),
        }
    }
}

/// Changeset category buckets, ordered by display precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Category {
    Features,
    BugFixes,
    Refactoring,
    Performance,
    Documentation,
    Chores,
    Others,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 7] = [
        Category::Features,
        Category::BugFixes,
        Category::Refactoring,
        Category::Performance,
        Category::Documentation,
        Category::Chores,
        Category::Others,
    ];

    /// Section heading used in rendered changesets.
    pub fn title(&self) -> &'static str {
        match self {
            Category::Features => "Features",
            Category::BugFixes => "Bug Fixes",
            Category::Refactoring => "Refactoring",
            Category::Performance => "Performance",
            Category::Documentation => "Documentation",
            Category::Chores => "Chores",
            Category::Others => "Others",
        }
    }
}

/// Classified change content for one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changeset {
    pub package: String,
    pub bump: Bump,
    /// Category -> formatted items, in commit order within each category.
    pub items: BTreeMap<Category, Vec<String>>,
}

/// Aggregate one package's attributed commits into category buckets and a
/// single version bump.
pub fn classify(changes: &PackageChanges) -> Changeset {
    // first matching rule wins across the whole commit set
    let subjects: Vec<&str> = changes
        .commits
        .iter()
        .map(|c| c.commit.subject.trim())
        .collect();

    let bump = if subjects.iter().any(|s| {
        s.contains(BREAKING_TOKEN) || s.contains(BREAKING_MARKER)
    }) {
        Bump::Major
    } else if subjects.iter().any(|s| FEAT_SUBJECT_REGEX.is_match(s)) {
        Bump::Minor
    } else {
        // `fix` prefixes and unmatched subjects both land here: patch is
        // the floor for any non-empty commit set
        Bump::Patch
    };

    let mut items: BTreeMap<Category, Vec<String>> = BTreeMap::new();

    for attributed in &changes.commits {
        let subject = attributed.commit.subject.trim();
        let (category, cleaned) = categorize(subject);

        let item =
            format!("{cleaned} ({})", short_hash(&attributed.commit.hash));

        items.entry(category).or_default().push(item);
    }

    Changeset {
        package: changes.package.name.clone(),
        bump,
        items,
    }
}

/// Match the subject against the ordered category prefixes. Matched
/// categories get the type prefix stripped; unmatched subjects land in
/// Others verbatim.
fn categorize(subject: &str) -> (Category, String) {
    let matchers: [(&Regex, Category); 6] = [
        (&FEAT_PREFIX_REGEX, Category::Features),
        (&FIX_PREFIX_REGEX, Category::BugFixes),
        (&REFACTOR_PREFIX_REGEX, Category::Refactoring),
        (&PERF_PREFIX_REGEX, Category::Performance),
        (&DOCS_PREFIX_REGEX, Category::Documentation),
        (&CHORE_PREFIX_REGEX, Category::Chores),
    ];

    for (regex, category) in matchers {
        if regex.is_match(subject) {
            let cleaned = regex.replace(subject, "").trim().to_string();
            return (category, cleaned);
        }
    }

    (Category::Others, subject.to_string())
}

fn short_hash(hash: &str) -> &str {
    &hash[..hash.len().min(7)]
}
