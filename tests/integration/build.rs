//! Build pipeline tests with a fake converter.

#![cfg(unix)]

use folio::converter::OutputFormat;
use folio::core::FolioError;
use folio::test_utils::{TestDocument, init_test_logging};

use crate::common::converter_config;

fn two_chapter_document() -> TestDocument {
    let doc = TestDocument::new().unwrap();
    doc.write_toc(&["# my document", "chapter1", "chapter2"]).unwrap();
    doc.add_chapter("chapter1", "# One\n").unwrap();
    doc.add_chapter("chapter2", "# Two\n").unwrap();
    doc
}

#[tokio::test]
async fn test_build_generates_html() {
    init_test_logging(None);
    let doc = two_chapter_document();
    doc.install_fake_converter(None).unwrap();

    let report = doc.project().await.unwrap().build(false).await.unwrap();

    assert_eq!(report.files, ["chapter1/chapter1.md", "chapter2/chapter2.md"]);
    assert_eq!(report.formats.len(), 1);
    assert!(report.formats[0].is_success());
    assert!(doc.out_dir().join("document.html").is_file());
    assert!(!doc.out_dir().join("document.pdf").exists());
}

#[tokio::test]
async fn test_converter_arguments() {
    let doc = two_chapter_document();
    doc.install_fake_converter(None).unwrap();

    let report = doc.project().await.unwrap().build(false).await.unwrap();
    let calls = doc.converter_calls().unwrap();
    assert_eq!(calls.len(), 1);
    let args = &calls[0];

    let html_options = ["--standalone", "--toc", "--number-sections", "--css", "style/default.css"];
    assert_eq!(&args[..html_options.len()], html_options);

    let rest = &args[html_options.len()..];
    assert_eq!(rest[0], "-V");
    assert_eq!(rest[1], format!("VERSION:{}", report.version));
    let template = doc.out_dir().join(".folio/templates/default.html");
    assert_eq!(rest[2], format!("--template={}", template.display()));
    assert_eq!(rest[3], "chapter1/chapter1.md");
    assert_eq!(rest[4], "chapter2/chapter2.md");
    assert_eq!(rest[5], "-o");
    assert_eq!(rest[6], doc.out_dir().join("document.html").display().to_string());
    assert_eq!(rest.len(), 7);

    let dirs = doc.converter_dirs().unwrap();
    assert!(dirs[0].ends_with("out/in"), "converter ran in {}", dirs[0].display());
}

#[tokio::test]
async fn test_forced_chapter_builds_alone() {
    let doc = two_chapter_document();
    doc.write_toc(&["chapter1", "!chapter2"]).unwrap();
    doc.install_fake_converter(None).unwrap();

    let report = doc.project().await.unwrap().build(false).await.unwrap();

    assert_eq!(report.files, ["chapter2/chapter2.md"]);
    let calls = doc.converter_calls().unwrap();
    assert!(calls[0].iter().all(|arg| !arg.contains("chapter1")));
}

#[tokio::test]
async fn test_missing_input_dir_aborts_before_cleaning() {
    let doc = TestDocument::new().unwrap();
    doc.install_fake_converter(None).unwrap();
    std::fs::create_dir_all(doc.out_dir()).unwrap();
    std::fs::write(doc.out_dir().join("keep.txt"), "old build").unwrap();

    let err = doc.project().await.unwrap().build(false).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<FolioError>(),
        Some(FolioError::InputDirNotFound { .. })
    ));
    assert!(doc.out_dir().join("keep.txt").is_file());
    assert!(doc.converter_calls().unwrap().is_empty());
}

#[tokio::test]
async fn test_pdf_failure_is_reported_after_html() {
    let doc = two_chapter_document();
    doc.install_fake_converter(Some("pdf")).unwrap();

    let report = doc.project().await.unwrap().build(true).await.unwrap();

    assert_eq!(report.formats.len(), 2);
    assert_eq!(report.formats[0].format, OutputFormat::Html);
    assert!(report.formats[0].is_success());
    match &report.formats[1].error {
        Some(FolioError::ConversionFailed {
            format,
            stderr,
        }) => {
            assert_eq!(format, "pdf");
            assert!(stderr.contains("cannot produce pdf"));
        }
        other => panic!("unexpected result: {other:?}"),
    }

    let calls = doc.converter_calls().unwrap();
    assert!(calls[0].iter().any(|arg| arg.ends_with("document.html")));
    assert!(calls[1].iter().any(|arg| arg.ends_with("document.pdf")));
    assert!(calls[1].iter().any(|arg| arg.ends_with("default.tex")));

    let err = report.into_result().unwrap_err();
    assert_eq!(
        err.downcast_ref::<FolioError>(),
        Some(&FolioError::BuildIncomplete {
            formats: vec!["pdf".to_string()]
        })
    );
}

#[tokio::test]
async fn test_chapters_are_rendered_in_staged_copy() {
    let doc = TestDocument::new().unwrap();
    doc.write_toc(&["intro"]).unwrap();
    let source = "# Intro\n\nFile {{ folio.md_file }} by {{ conf.author }}, {{ folio.doc_version }}\n";
    let source_path = doc.add_chapter("intro", source).unwrap();
    let converter = doc.install_fake_converter(None).unwrap();
    doc.write_config(&converter_config(&converter, "[user]\nauthor = \"Jane\"\n")).unwrap();

    let report = doc.project().await.unwrap().build(false).await.unwrap();

    let staged = std::fs::read_to_string(doc.out_dir().join("in/intro/intro.md")).unwrap();
    assert_eq!(
        staged,
        format!("# Intro\n\nFile intro/intro.md by Jane, {}\n", report.version)
    );
    assert!(!staged.contains("{{"));
    assert_eq!(std::fs::read_to_string(source_path).unwrap(), source);
}

#[tokio::test]
async fn test_template_error_names_chapter() {
    let doc = two_chapter_document();
    doc.add_chapter("chapter2", "{{ folio.verison }}\n").unwrap();
    doc.install_fake_converter(None).unwrap();

    let err = doc.project().await.unwrap().build(false).await.unwrap_err();

    match err.downcast_ref::<FolioError>() {
        Some(FolioError::TemplateRenderError {
            file,
            message,
        }) => {
            assert_eq!(file, "chapter2/chapter2.md");
            assert!(message.contains("folio.version"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(doc.converter_calls().unwrap().is_empty());
}

#[tokio::test]
async fn test_images_and_style_are_staged() {
    let doc = two_chapter_document();
    doc.add_image("chapter1", "figure.png", b"png").unwrap();
    doc.install_fake_converter(None).unwrap();

    doc.project().await.unwrap().build(false).await.unwrap();

    assert!(doc.out_dir().join("chapter1/img/figure.png").is_file());
    assert!(doc.out_dir().join("in/chapter1/img/figure.png").is_file());
    assert!(!doc.out_dir().join("chapter2").exists());
    assert!(doc.out_dir().join("style/default.css").is_file());
}

#[tokio::test]
async fn test_project_template_and_options() {
    let doc = two_chapter_document();
    let converter = doc.install_fake_converter(None).unwrap();
    doc.write_config(&converter_config(
        &converter,
        "pandoc_options_html = \"--metadata 'title=My Manual'\"\ndoc_filename = \"manual\"\n",
    ))
    .unwrap();
    let templates = doc.path().join("templates");
    std::fs::create_dir_all(&templates).unwrap();
    std::fs::write(templates.join("default.html"), "$body$").unwrap();

    doc.project().await.unwrap().build(false).await.unwrap();

    let args = &doc.converter_calls().unwrap()[0];
    assert_eq!(args[0], "--metadata");
    assert_eq!(args[1], "title=My Manual");
    assert!(args.contains(&format!("--template={}", templates.join("default.html").display())));
    assert!(doc.out_dir().join("manual.html").is_file());
    assert!(!doc.out_dir().join(".folio").exists());
}

#[tokio::test]
async fn test_build_recreates_output() {
    let doc = two_chapter_document();
    doc.install_fake_converter(None).unwrap();
    std::fs::create_dir_all(doc.out_dir().join("stale")).unwrap();

    doc.project().await.unwrap().build(false).await.unwrap();

    assert!(!doc.out_dir().join("stale").exists());
    assert!(doc.out_dir().join("document.html").is_file());
}

#[tokio::test]
async fn test_sample_document_builds() {
    let doc = TestDocument::sample().unwrap();
    doc.install_fake_converter(None).unwrap();

    let report = doc.project().await.unwrap().build(false).await.unwrap();

    assert_eq!(
        report.files,
        ["chapter1/chapter1.md", "chapter2/chapter2.md", "chapter3/chapter3.md"]
    );
    assert!(doc.out_dir().join("chapter1/img/sample.svg").is_file());
}
