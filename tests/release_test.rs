// tests/release_test.rs
use git2::{Repository, Signature};
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

use yamusic_tools::cli::{run_release, ReleaseArgs, ReleaseOutcome};
use yamusic_tools::domain::Tag;
use yamusic_tools::git::Git2Repository;
use yamusic_tools::ui::ScriptedPrompt;

const BIN: &str = env!("CARGO_BIN_EXE_yamusic-tools");

struct TestRepo {
    work: TempDir,
    origin: TempDir,
}

impl TestRepo {
    fn path(&self) -> &Path {
        self.work.path()
    }

    fn repo(&self) -> Repository {
        Repository::open(self.work.path()).expect("Could not open work repo")
    }

    fn origin_repo(&self) -> Repository {
        Repository::open_bare(self.origin.path()).expect("Could not open origin repo")
    }

    fn commit_version(&self, version: &str, message: &str) {
        fs::write(self.path().join("version.txt"), format!("{}\n", version))
            .expect("Could not write version.txt");
        commit_all(&self.repo(), message);
    }

    fn tag(&self, name: &str) {
        let repo = self.repo();
        let head = repo.head().unwrap().peel_to_commit().unwrap();
        let sig = repo.signature().unwrap();
        repo.tag(name, head.as_object(), &sig, name, false)
            .expect("Could not create tag");
    }

    fn release_args(&self) -> ReleaseArgs {
        ReleaseArgs {
            version_file: self.path().join("version.txt"),
            ..ReleaseArgs::default()
        }
    }
}

fn commit_all(repo: &Repository, message: &str) {
    let mut index = repo.index().expect("Could not get index");
    index
        .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
        .expect("Could not add files");
    index.write().expect("Could not write index");
    let tree = repo
        .find_tree(index.write_tree().expect("Could not write tree"))
        .expect("Could not find tree");
    let sig = Signature::now("Test User", "test@example.com").unwrap();

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .expect("Could not create commit");
}

// Work repository with version.txt committed and a bare `origin` remote.
fn setup_test_repo(version: &str) -> TestRepo {
    let work = TempDir::new().expect("Could not create temp dir");
    let origin = TempDir::new().expect("Could not create temp dir");

    Repository::init_bare(origin.path()).expect("Could not init bare repo");
    let repo = Repository::init(work.path()).expect("Could not init git repo");
    {
        let mut config = repo.config().expect("Could not get config");
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
    }
    repo.remote("origin", origin.path().to_str().unwrap())
        .expect("Could not add remote");

    let test_repo = TestRepo { work, origin };
    test_repo.commit_version(version, "Initial commit");
    test_repo
}

fn run_in_process(repo: &TestRepo, answers: &[&str]) -> (ReleaseOutcome, String) {
    let git = Git2Repository::open(repo.path()).unwrap();
    let mut prompt = ScriptedPrompt::new(answers.iter().copied());
    let mut out = Vec::new();
    let outcome = run_release(&git, &repo.release_args(), &mut prompt, &mut out)
        .expect("release should succeed");
    (outcome, String::from_utf8(out).unwrap())
}

#[test]
fn test_newer_version_creates_annotated_tag_and_pushes_it() {
    let repo = setup_test_repo("1.0.0");
    repo.tag("v1.0.0");
    repo.commit_version("1.1.0", "bump version");

    let (outcome, out) = run_in_process(&repo, &["Second release"]);

    assert_eq!(
        outcome,
        ReleaseOutcome::Tagged {
            tag: Tag::new("v1.1.0"),
            remote: "origin".to_string()
        }
    );
    assert_eq!(
        out,
        "Latest tag: v1.0.0\nVersion in version.txt: 1.1.0\nCreating new tag: 1.1.0\n"
    );

    let local = repo.repo();
    let reference = local.find_reference("refs/tags/v1.1.0").unwrap();
    let tag = reference.peel_to_tag().expect("tag should be annotated");
    assert_eq!(tag.message(), Some("Second release"));
    let head = local.head().unwrap().peel_to_commit().unwrap();
    assert_eq!(tag.target_id(), head.id());

    let origin = repo.origin_repo();
    assert!(origin.find_reference("refs/tags/v1.1.0").is_ok());
    assert!(origin.find_reference("refs/tags/v1.0.0").is_err());
}

#[test]
fn test_second_run_reports_no_new_tag() {
    let repo = setup_test_repo("1.0.0");
    repo.tag("v1.0.0");
    repo.commit_version("2.0.0", "major bump");

    let (first, _) = run_in_process(&repo, &["two"]);
    assert!(matches!(first, ReleaseOutcome::Tagged { .. }));

    let (second, out) = run_in_process(&repo, &[]);
    assert!(matches!(second, ReleaseOutcome::UpToDate { .. }));
    assert_eq!(
        out,
        "Latest tag: v2.0.0\nVersion in version.txt: 2.0.0\n\
         No new tag created. The version in version.txt is not greater than the latest tag.\n"
    );
}

#[test]
fn test_lightweight_tag_is_considered() {
    let repo = setup_test_repo("0.2.0");
    {
        let git = repo.repo();
        let head = git.head().unwrap().peel_to_commit().unwrap();
        git.tag_lightweight("v0.2.0", head.as_object(), false).unwrap();
    }

    let (outcome, _) = run_in_process(&repo, &[]);
    assert!(matches!(outcome, ReleaseOutcome::UpToDate { .. }));
}

#[test]
fn test_binary_dirty_repository_exits_with_one() {
    let repo = setup_test_repo("1.0.0");
    repo.tag("v1.0.0");
    fs::write(repo.path().join("scratch.txt"), "untracked").unwrap();

    let output = Command::new(BIN)
        .arg("release")
        .arg("--message")
        .arg("unused")
        .current_dir(repo.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "Repository is dirty. Please commit or stash your changes before tagging.\n"
    );
    assert!(repo.repo().tag_names(None).unwrap().len() == 1);
}

#[test]
fn test_binary_modified_tracked_file_is_dirty() {
    let repo = setup_test_repo("1.0.0");
    repo.tag("v1.0.0");
    fs::write(repo.path().join("version.txt"), "1.0.1\n").unwrap();

    let output = Command::new(BIN)
        .arg("release")
        .current_dir(repo.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_binary_up_to_date_exits_cleanly() {
    let repo = setup_test_repo("1.0.0");
    repo.tag("v1.0.0");

    let output = Command::new(BIN)
        .arg("release")
        .current_dir(repo.path())
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Latest tag: v1.0.0"));
    assert!(stdout.contains("No new tag created."));
}

#[test]
fn test_binary_tags_and_pushes_with_message_flag() {
    let repo = setup_test_repo("1.0.0");
    repo.tag("v1.0.0");
    repo.commit_version("1.0.1", "patch");

    let output = Command::new(BIN)
        .args(["release", "--message", "Patch release"])
        .current_dir(repo.path())
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8(output.stdout)
        .unwrap()
        .contains("Creating new tag: 1.0.1"));
    assert!(repo.origin_repo().find_reference("refs/tags/v1.0.1").is_ok());
}

#[test]
fn test_binary_malformed_tag_fails_without_tagging() {
    let repo = setup_test_repo("1.0.0");
    repo.tag("release-1");
    repo.commit_version("1.0.1", "patch");

    let output = Command::new(BIN)
        .args(["release", "--message", "x"])
        .current_dir(repo.path())
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Malformed tag 'release'"), "stderr: {}", stderr);
    assert_eq!(repo.repo().tag_names(None).unwrap().len(), 1);
}
