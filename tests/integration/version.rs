//! Version labels with and without a repository.

use regex::Regex;
use std::path::Path;
use std::process::Command;

use folio::git;
use folio::test_utils::TestDocument;

use crate::common::{GIT_IDENTITY, git_available};

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(args)
        .current_dir(dir)
        .envs(GIT_IDENTITY)
        .env_remove("GIT_DIR")
        .env_remove("GIT_WORK_TREE")
        .status()
        .unwrap();
    assert!(status.success(), "git {args:?} failed");
}

#[tokio::test]
async fn test_version_without_repository_is_a_date() {
    let doc = TestDocument::sample().unwrap();
    if git::find_repository_root(doc.path()).is_some() {
        // The temp dir sits inside a checkout; nothing to test here
        return;
    }

    let version = doc.project().await.unwrap().version().await;

    let date = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    assert!(date.is_match(&version), "unexpected version {version}");
}

#[tokio::test]
async fn test_version_from_enclosing_repository() {
    if !git_available() {
        println!("git not available, skipping");
        return;
    }

    let doc = TestDocument::sample().unwrap();
    // The repository lives one level above the document
    let repo = doc.path().parent().unwrap();
    git(repo, &["init", "--quiet"]);
    git(repo, &["add", "doc"]);
    git(repo, &["commit", "--quiet", "-m", "Add document"]);

    let version = doc.project().await.unwrap().version().await;

    let label = Regex::new(r"^\d{4}-\d{2}-\d{2} \([0-9a-f]{4,}\)$").unwrap();
    assert!(label.is_match(&version), "unexpected version {version}");
}

#[tokio::test]
async fn test_version_in_repository_without_commits_falls_back() {
    if !git_available() {
        println!("git not available, skipping");
        return;
    }

    let doc = TestDocument::sample().unwrap();
    git(doc.path(), &["init", "--quiet"]);

    let version = doc.project().await.unwrap().version().await;

    assert_eq!(version, git::fallback_version());
}
