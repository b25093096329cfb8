// tests/pipeline_test.rs
//
// End-to-end runs of the release pipeline pieces against a real temporary
// git repository: tag lookup, paginated history, classification, rendering,
// and manifest persistence.

use ci_release::changelog::{ChangelogRenderer, RenderOptions};
use ci_release::classifier::{Buckets, CommitClassifier};
use ci_release::domain::{latest_release_tag, Severity, Version};
use ci_release::git::{fetch_history, Git2Repository, ReleaseRepository};
use ci_release::manifest;
use git2::{Oid, Repository};
use serial_test::serial;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn add_commit(repo: &Repository, file_content: &str, message: &str) -> Oid {
    let content_path = repo.workdir().unwrap().join("README.md");
    fs::write(&content_path, file_content).expect("Could not write file");

    let mut index = repo.index().expect("Could not get index");
    index
        .add_path(Path::new("README.md"))
        .expect("Could not add file to index");
    index.write().expect("Could not write index");

    let tree_id = index.write_tree().expect("Could not write tree");
    let tree = repo.find_tree(tree_id).expect("Could not find tree");
    let sig = repo.signature().expect("Could not get signature");

    let parents: Vec<git2::Commit> = match repo.head() {
        Ok(head) => vec![head.peel_to_commit().expect("Could not peel head")],
        Err(_) => vec![],
    };
    let parent_refs: Vec<&git2::Commit> = parents.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
        .expect("Could not create commit")
}

fn setup_test_repo() -> TempDir {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let repo = Repository::init(temp_dir.path()).expect("Could not init git repo");

    {
        let mut config = repo.config().expect("Could not get config");
        config
            .set_str("user.name", "Test User")
            .expect("Could not set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Could not set user.email");
    }

    let tagged = add_commit(&repo, "Initial content\n", "chore: initial commit");
    repo.tag_lightweight(
        "v1.0.0",
        &repo.find_object(tagged, None).unwrap(),
        false,
    )
    .expect("Could not create tag");

    add_commit(&repo, "With feature\n", "feat(search): add fuzzy matching");
    add_commit(
        &repo,
        "With fix\n",
        "fix: stop dropping events (#42)\nmore detail about the event loop",
    );

    temp_dir
}

#[test]
#[serial]
fn test_pipeline_classifies_commits_since_tag() {
    let temp_dir = setup_test_repo();
    let repo = Git2Repository::open(temp_dir.path()).expect("Could not open repo");

    let tags = repo.list_tags().unwrap();
    let (latest, version) = latest_release_tag(&tags, "v").unwrap().expect("tag exists");
    assert_eq!(latest.name, "v1.0.0");
    assert_eq!(version, Version::new(1, 0, 0));

    let commits = fetch_history(&repo, Some(latest.commit_sha.as_str()), 100).unwrap();
    // The tagged commit is present in history but excluded by the classifier
    assert!(commits.iter().any(|c| c.sha == latest.commit_sha));

    let classifier = CommitClassifier::new("https://github.com/acme/widget");
    let result = classifier.classify(&commits, Some(&latest.commit_sha), &version);

    assert_eq!(result.bump, Severity::Minor);
    assert_eq!(result.next_version, Some(Version::new(1, 1, 0)));
    assert!(!result.using_in_existing_env);

    match &result.buckets {
        Buckets::Sections(sections) => {
            assert_eq!(sections.minor.len(), 1);
            assert!(sections.minor[0].starts_with("**search**: add fuzzy matching"));
            assert!(sections.minor[0].contains("/commit/"));
            assert_eq!(sections.patch.len(), 1);
            assert!(sections.patch[0].contains("stop dropping events"));
            assert!(sections.patch[0].contains("(#42)"));
        }
        Buckets::RawOverride(_) => panic!("unexpected raw override"),
    }

    let changelog = ChangelogRenderer::new(RenderOptions::default()).render(&result.buckets);
    assert!(changelog.contains("### New Features"));
    assert!(changelog.contains("### Bug Fixes"));
}

#[test]
#[serial]
fn test_pipeline_initial_release_without_tags() {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let git_repo = Repository::init(temp_dir.path()).expect("Could not init git repo");
    {
        let mut config = git_repo.config().expect("Could not get config");
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
    }
    add_commit(&git_repo, "Everything\n", "feat: the whole product");

    let repo = Git2Repository::open(temp_dir.path()).expect("Could not open repo");
    let tags = repo.list_tags().unwrap();
    assert!(latest_release_tag(&tags, "v").unwrap().is_none());

    let commits = fetch_history(&repo, None, 100).unwrap();
    let classifier = CommitClassifier::new("");
    let result = classifier.classify(&commits, None, &Version::new(0, 0, 0));

    assert_eq!(result.next_version, Some(Version::new(0, 0, 1)));
    let changelog = ChangelogRenderer::new(RenderOptions::default()).render(&result.buckets);
    assert_eq!(changelog, "🎉 Initial release");
}

#[test]
#[serial]
fn test_pipeline_tag_creation() {
    let temp_dir = setup_test_repo();
    let repo = Git2Repository::open(temp_dir.path()).expect("Could not open repo");

    let head = repo.head_sha().unwrap();
    repo.create_tag("v1.1.0", &head).unwrap();

    let tags = repo.list_tags().unwrap();
    let (latest, version) = latest_release_tag(&tags, "v").unwrap().expect("tag exists");
    assert_eq!(latest.name, "v1.1.0");
    assert_eq!(version, Version::new(1, 1, 0));
    assert_eq!(latest.commit_sha, head);
}

#[test]
fn test_manifest_roundtrip_in_release_flow() {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let manifest_path = temp_dir.path().join("package.json");
    fs::write(
        &manifest_path,
        r#"{"name": "widget", "version": "1.0.9", "private": true}"#,
    )
    .unwrap();

    let info = manifest::read_manifest(&manifest_path).unwrap();
    assert_eq!(info.name, Some("widget".to_string()));
    assert!(info.version.is_stable());

    let next = info.version.bump(Severity::Minor).unwrap();
    assert_eq!(next, Version::new(1, 1, 0));

    manifest::write_version(&manifest_path, &next).unwrap();
    let updated = manifest::read_manifest(&manifest_path).unwrap();
    assert_eq!(updated.version, Version::new(1, 1, 0));
}
