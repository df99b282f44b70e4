//! Chapter directory reconciliation through a loaded project.

use std::path::Path;

use folio::core::FolioError;
use folio::outline::DeclineAll;
use folio::test_utils::TestDocument;

#[tokio::test]
async fn test_outline_creates_listed_chapters() {
    let doc = TestDocument::new().unwrap();
    doc.write_toc(&["# draft", "preface", "", "methods"]).unwrap();
    let project = doc.project().await.unwrap();

    let report = project.outline(false, &mut DeclineAll).await.unwrap();

    assert_eq!(report.created, ["preface", "methods"]);
    assert!(report.orphaned.is_empty());
    let preface = std::fs::read_to_string(doc.in_dir().join("preface/preface.md")).unwrap();
    assert_eq!(preface, "# preface\n");
    assert!(doc.in_dir().join("methods/methods.md").is_file());
}

#[tokio::test]
async fn test_outline_is_idempotent() {
    let doc = TestDocument::sample().unwrap();
    let project = doc.project().await.unwrap();

    let first = project.outline(false, &mut DeclineAll).await.unwrap();
    let second = project.outline(false, &mut DeclineAll).await.unwrap();

    assert!(first.is_unchanged());
    assert!(second.is_unchanged());
    assert_eq!(second.present, ["chapter1", "chapter2", "chapter3"]);
}

#[tokio::test]
async fn test_outline_keeps_existing_content() {
    let doc = TestDocument::new().unwrap();
    doc.write_toc(&["intro"]).unwrap();
    doc.add_chapter("intro", "Written by hand\n").unwrap();
    let project = doc.project().await.unwrap();

    let report = project.outline(false, &mut DeclineAll).await.unwrap();

    assert!(report.created.is_empty());
    assert_eq!(
        std::fs::read_to_string(doc.in_dir().join("intro/intro.md")).unwrap(),
        "Written by hand\n"
    );
}

#[tokio::test]
async fn test_unlisted_chapters_need_delete_and_confirmation() {
    let doc = TestDocument::sample().unwrap();
    doc.write_toc(&["chapter1", "chapter2"]).unwrap();
    let project = doc.project().await.unwrap();

    let report = project.outline(false, &mut |_: &Path| true).await.unwrap();
    assert_eq!(report.orphaned, ["chapter3"]);
    assert!(report.removed.is_empty());
    assert!(doc.in_dir().join("chapter3").is_dir());

    let report = project.outline(true, &mut DeclineAll).await.unwrap();
    assert!(report.removed.is_empty());
    assert!(doc.in_dir().join("chapter3").is_dir());

    let mut asked = Vec::new();
    let report = project
        .outline(true, &mut |dir: &Path| {
            asked.push(dir.to_path_buf());
            true
        })
        .await
        .unwrap();
    assert_eq!(report.removed, ["chapter3"]);
    assert_eq!(asked, [doc.in_dir().join("chapter3")]);
    assert!(!doc.in_dir().join("chapter3").exists());
    assert!(doc.in_dir().join("chapter1").is_dir());
}

#[tokio::test]
async fn test_forced_lines_limit_the_outline() {
    let doc = TestDocument::new().unwrap();
    doc.write_toc(&["alpha", "!beta"]).unwrap();
    let project = doc.project().await.unwrap();

    let report = project.outline(false, &mut DeclineAll).await.unwrap();

    assert_eq!(report.created, ["beta"]);
    assert!(!doc.in_dir().join("alpha").exists());
}

#[tokio::test]
async fn test_outline_without_toc_fails() {
    let doc = TestDocument::new().unwrap();
    std::fs::create_dir_all(doc.in_dir()).unwrap();
    let project = doc.project().await.unwrap();

    let err = project.outline(false, &mut DeclineAll).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<FolioError>(),
        Some(FolioError::TocNotFound { .. })
    ));
}
