//! End-to-end pipeline tests against a mock git history.

use std::path::Path;

use crate::{
    cli::Invocation,
    command::{RunStatus, generate},
    config::Config,
    repo::traits::{CommitInfo, MockGitQuery},
};

fn write_package(root: &Path, dir: &str, name: &str) {
    let package_dir = root.join("packages").join(dir);
    std::fs::create_dir_all(&package_dir).unwrap();
    std::fs::write(
        package_dir.join("package.json"),
        format!(r#"{{ "name": "{name}" }}"#),
    )
    .unwrap();
}

fn scenario_git() -> MockGitQuery {
    let mut git = MockGitQuery::new();

    git.expect_merge_base()
        .returning(|_, _| Ok("basesha".into()));

    git.expect_list_commits().returning(|_, _| {
        Ok(vec![
            CommitInfo {
                hash: "abc1234000000000000000000000000000000000".into(),
                subject: "feat: add button".into(),
            },
            CommitInfo {
                hash: "def5678000000000000000000000000000000000".into(),
                subject: "fix!: null deref".into(),
            },
        ])
    });

    git.expect_changed_files().returning(|hash| {
        if hash.starts_with("abc1234") {
            Ok(vec!["packages/ui/src/Button.ts".into()])
        } else {
            Ok(vec!["packages/core/src/x.ts".into()])
        }
    });

    git
}

fn invocation(related_link: Option<&str>) -> Invocation {
    Invocation {
        related_link: related_link.map(|l| l.to_string()),
        source_branch: "feature/login".into(),
        target_branch: Some("main".into()),
        pr_number: 42,
    }
}

fn config() -> Config {
    Config {
        packages_dir: "packages".into(),
        output_dir: ".changesets".into(),
    }
}

#[test_log::test]
fn generates_changesets_for_affected_packages() {
    let dir = tempfile::tempdir().unwrap();
    write_package(dir.path(), "ui", "ui");
    write_package(dir.path(), "core", "core");

    let git = scenario_git();

    let report = generate(
        &git,
        &invocation(Some("https://github.com/acme/repo/pull/42")),
        &config(),
        dir.path(),
    )
    .unwrap();

    assert_eq!(report.status, RunStatus::Success);
    assert_eq!(report.written.len(), 2);
    assert!(report.failed_packages.is_empty());

    let ui_doc = std::fs::read_to_string(
        dir.path().join(".changesets/42-ui.md"),
    )
    .unwrap();

    assert_eq!(
        ui_doc,
        "---\n\
         \"ui\": minor\n\
         ---\n\
         \n\
         - Features\n\
         \x20 - add button (abc1234)\n\
         \n\
         Related: https://github.com/acme/repo/pull/42\n"
    );

    let core_doc = std::fs::read_to_string(
        dir.path().join(".changesets/42-core.md"),
    )
    .unwrap();

    assert_eq!(
        core_doc,
        "---\n\
         \"core\": major\n\
         ---\n\
         \n\
         - Others\n\
         \x20 - fix!: null deref (def5678)\n\
         \n\
         Related: https://github.com/acme/repo/pull/42\n"
    );
}

#[test]
fn zero_commits_short_circuits_with_no_output() {
    let dir = tempfile::tempdir().unwrap();
    write_package(dir.path(), "ui", "ui");

    let mut git = MockGitQuery::new();
    git.expect_merge_base()
        .returning(|_, _| Ok("basesha".into()));
    git.expect_list_commits().returning(|_, _| Ok(vec![]));

    let report =
        generate(&git, &invocation(None), &config(), dir.path()).unwrap();

    assert_eq!(report.status, RunStatus::NoCommits);
    assert!(report.written.is_empty());
    assert!(!dir.path().join(".changesets").exists());
}

#[test]
fn root_level_commits_produce_no_changesets() {
    let dir = tempfile::tempdir().unwrap();
    write_package(dir.path(), "ui", "ui");

    let mut git = MockGitQuery::new();
    git.expect_merge_base()
        .returning(|_, _| Ok("basesha".into()));
    git.expect_list_commits().returning(|_, _| {
        Ok(vec![CommitInfo {
            hash: "abc1234000000000000000000000000000000000".into(),
            subject: "chore: update ci".into(),
        }])
    });
    git.expect_changed_files()
        .returning(|_| Ok(vec![".github/workflows/ci.yml".into()]));

    let report =
        generate(&git, &invocation(None), &config(), dir.path()).unwrap();

    assert_eq!(report.status, RunStatus::Success);
    assert!(report.written.is_empty());
}

#[test_log::test]
fn reruns_produce_byte_identical_output() {
    let dir = tempfile::tempdir().unwrap();
    write_package(dir.path(), "ui", "ui");
    write_package(dir.path(), "core", "core");

    let invocation =
        invocation(Some("https://github.com/acme/repo/pull/42"));

    let git = scenario_git();
    generate(&git, &invocation, &config(), dir.path()).unwrap();
    let first =
        std::fs::read_to_string(dir.path().join(".changesets/42-ui.md"))
            .unwrap();

    let git = scenario_git();
    generate(&git, &invocation, &config(), dir.path()).unwrap();
    let second =
        std::fs::read_to_string(dir.path().join(".changesets/42-ui.md"))
            .unwrap();

    assert_eq!(first, second);
}

#[test]
fn write_failures_are_partial_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_package(dir.path(), "ui", "ui");
    write_package(dir.path(), "core", "core");

    // a file occupying the output directory path makes every write fail
    std::fs::write(dir.path().join(".changesets"), "not a directory").unwrap();

    let git = scenario_git();

    let report = generate(
        &git,
        &invocation(None),
        &config(),
        dir.path(),
    )
    .unwrap();

    assert_eq!(report.status, RunStatus::PartialSuccess);
    assert!(report.written.is_empty());
    assert_eq!(report.failed_packages.len(), 2);
}

#[test]
fn missing_packages_root_is_fatal() {
    let dir = tempfile::tempdir().unwrap();

    let git = MockGitQuery::new();

    let result = generate(&git, &invocation(None), &config(), dir.path());

    assert!(result.is_err());
}
