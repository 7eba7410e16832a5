//! Changeset document rendering.
//!
//! Rendering is pure and deterministic: identical classified input always
//! produces byte-identical text, which is what makes re-runs idempotent.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::{
    classifier::{Category, Changeset},
    error::Result,
};

/// Default changeset body template.
pub const DEFAULT_BODY: &str = r#"---
"{{ package }}": {{ bump }}
---

{% for section in sections %}- {{ section.title }}
{% for item in section.items %}  - {{ item }}
{% endfor %}{% endfor %}
{% if related_link %}Related: {{ related_link }}
{% endif %}"#;

/// Matches 3 or more consecutive new lines
static EXTRA_NEW_LINES_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

#[derive(Debug, Serialize)]
struct SectionView {
    title: &'static str,
    items: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ChangesetView {
    package: String,
    bump: String,
    sections: Vec<SectionView>,
    related_link: Option<String>,
}

impl ChangesetView {
    fn new(changeset: &Changeset, related_link: Option<&str>) -> Self {
        // fixed display order regardless of discovery order; empty
        // categories are omitted entirely
        let sections = Category::ALL
            .iter()
            .filter_map(|category| {
                changeset.items.get(category).map(|items| SectionView {
                    title: category.title(),
                    items: items.clone(),
                })
            })
            .collect();

        Self {
            package: changeset.package.clone(),
            bump: changeset.bump.to_string(),
            sections,
            related_link: related_link.map(|l| l.to_string()),
        }
    }
}

/// Render a classified changeset into its document text.
pub fn render(
    changeset: &Changeset,
    related_link: Option<&str>,
) -> Result<String> {
    let view = ChangesetView::new(changeset, related_link);
    let context = tera::Context::from_serialize(&view)?;
    let notes = tera::Tera::one_off(DEFAULT_BODY, &context, false)?;

    Ok(format!("{}\n", strip_extra_lines(&notes)))
}

/// Normalize formatting by replacing consecutive blank lines (3+) with
/// double newlines and trimming whitespace.
fn strip_extra_lines(document: &str) -> String {
    EXTRA_NEW_LINES_REGEX
        .replace_all(document, "\n\n")
        .trim()
        .to_string()
}
