//! The `folio` binary end to end.

use predicates::prelude::*;

use folio::test_utils::TestDocument;

use crate::common::{GIT_IDENTITY, folio_cmd, git_available};

#[test]
fn test_version_flag() {
    let doc = TestDocument::new().unwrap();
    folio_cmd(doc.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_init_creates_sample_document() {
    let doc = TestDocument::new().unwrap();

    folio_cmd(doc.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created sample document"))
        .stdout(predicate::str::contains("folio outline"));

    assert!(doc.path().join("folio.toml").is_file());
    assert!(doc.in_dir().join("toc.txt").is_file());
    assert!(doc.in_dir().join("chapter1/chapter1.md").is_file());
    assert!(doc.in_dir().join("chapter1/img/sample.svg").is_file());
}

#[test]
fn test_init_refuses_existing_document() {
    let doc = TestDocument::sample().unwrap();
    doc.write_config("[main]\nout_dir = \"build\"\n").unwrap();

    folio_cmd(doc.path())
        .arg("init")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Document already exists"));

    let config = std::fs::read_to_string(doc.path().join("folio.toml")).unwrap();
    assert_eq!(config, "[main]\nout_dir = \"build\"\n");

    folio_cmd(doc.path()).args(["init", "--force"]).assert().success();
    let config = std::fs::read_to_string(doc.path().join("folio.toml")).unwrap();
    assert!(config.contains("pandoc_cmd = \"pandoc\""));
}

#[test]
fn test_init_creates_missing_doc_dir() {
    let doc = TestDocument::new().unwrap();
    let nested = doc.path().join("books/manual");

    folio_cmd(&nested).arg("init").assert().success();

    assert!(nested.join("in/toc.txt").is_file());
}

#[test]
fn test_check_reports_missing_converter() {
    let doc = TestDocument::sample().unwrap();
    doc.write_config("[main]\npandoc_cmd = \"folio-no-such-converter-xyz\"\n").unwrap();

    folio_cmd(doc.path())
        .arg("check")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Environment check failed"))
        .stderr(predicate::str::contains("Couldn't find 'folio-no-such-converter-xyz'"));
}

#[cfg(unix)]
#[test]
fn test_check_reports_missing_input_dir() {
    let doc = TestDocument::new().unwrap();
    doc.write_config("[main]\npandoc_cmd = \"sh\"\n").unwrap();

    folio_cmd(doc.path())
        .arg("check")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Couldn't find input folder"));

    assert!(!doc.out_dir().exists());
}

#[cfg(unix)]
#[test]
fn test_check_reports_missing_toc() {
    let doc = TestDocument::new().unwrap();
    doc.write_config("[main]\npandoc_cmd = \"sh\"\n").unwrap();
    std::fs::create_dir_all(doc.in_dir()).unwrap();

    folio_cmd(doc.path())
        .arg("check")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Couldn't find table of contents"));
}

#[cfg(unix)]
#[test]
fn test_check_verbose_shows_configuration() {
    let doc = TestDocument::sample().unwrap();
    doc.write_config("[main]\npandoc_cmd = \"sh\"\n\n[user]\nauthor = \"Jane\"\n").unwrap();

    folio_cmd(doc.path())
        .args(["check", "--verbose"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pandoc_cmd = \"sh\" (project)"))
        .stdout(predicate::str::contains("in_dir = \"in\" (default)"))
        .stdout(predicate::str::contains("conf.author"))
        .stdout(predicate::str::contains("Document version:"))
        .stdout(predicate::str::contains("Environment OK"));
}

#[test]
fn test_check_verbose_reports_configuration_on_failure() {
    let doc = TestDocument::new().unwrap();
    doc.write_config("[main]\npandoc_cmd = \"folio-no-such-converter-xyz\"\n").unwrap();

    folio_cmd(doc.path())
        .args(["check", "--verbose"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("folio-no-such-converter-xyz: not found"))
        .stdout(predicate::str::contains("in_dir = \"in\" (default)"))
        .stdout(predicate::str::contains("Environment OK").not())
        .stderr(predicate::str::contains("Environment check failed"));
}

#[test]
fn test_invalid_config_is_reported() {
    let doc = TestDocument::sample().unwrap();
    doc.write_config("[main\npandoc_cmd = \"sh\"\n").unwrap();

    folio_cmd(doc.path())
        .arg("check")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("folio.toml"));
}

#[test]
fn test_missing_explicit_config_is_reported() {
    let doc = TestDocument::sample().unwrap();

    folio_cmd(doc.path())
        .args(["check", "--config"])
        .arg(doc.path().join("elsewhere.toml"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("elsewhere.toml"));
}

#[cfg(unix)]
#[test]
fn test_build_command_generates_html() {
    let doc = TestDocument::sample().unwrap();
    doc.install_fake_converter(None).unwrap();

    folio_cmd(doc.path())
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reading table of contents..."))
        .stdout(predicate::str::contains("Generating documents..."))
        .stdout(predicate::str::contains("document.html"))
        .stdout(predicate::str::contains("Done ("));

    assert!(doc.out_dir().join("document.html").is_file());
    assert!(!doc.out_dir().join("document.pdf").exists());
}

#[cfg(unix)]
#[test]
fn test_build_quiet_prints_nothing() {
    let doc = TestDocument::sample().unwrap();
    doc.install_fake_converter(None).unwrap();

    folio_cmd(doc.path())
        .args(["--quiet", "build"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[cfg(unix)]
#[test]
fn test_build_pdf_failure_exits_nonzero() {
    let doc = TestDocument::sample().unwrap();
    doc.install_fake_converter(Some("pdf")).unwrap();

    folio_cmd(doc.path())
        .args(["build", "--pdf"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("document.html"))
        .stderr(predicate::str::contains("Converter failed while generating pdf"))
        .stderr(predicate::str::contains("Document generation incomplete: pdf failed"));

    assert!(doc.out_dir().join("document.html").is_file());
    assert_eq!(doc.converter_calls().unwrap().len(), 2);
}

#[cfg(unix)]
#[test]
fn test_build_without_input_names_the_phase() {
    let doc = TestDocument::new().unwrap();
    doc.install_fake_converter(None).unwrap();

    folio_cmd(doc.path())
        .arg("build")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Checking environment failed"))
        .stderr(predicate::str::contains("Couldn't find input folder"));

    assert!(!doc.out_dir().exists());
}

#[test]
fn test_clean_removes_output() {
    let doc = TestDocument::sample().unwrap();
    std::fs::create_dir_all(doc.out_dir().join("in")).unwrap();
    std::fs::write(doc.out_dir().join("document.html"), "old").unwrap();

    folio_cmd(doc.path()).arg("clean").assert().success();
    assert!(!doc.out_dir().exists());

    // Nothing to remove is fine
    folio_cmd(doc.path()).arg("clean").assert().success();
}

#[test]
fn test_outline_command() {
    let doc = TestDocument::sample().unwrap();
    doc.write_toc(&["chapter1", "chapter2", "appendix"]).unwrap();

    folio_cmd(doc.path())
        .args(["outline", "--delete"])
        .assert()
        .success()
        .stdout(predicate::str::contains("created appendix"))
        .stdout(predicate::str::contains("unlisted chapter3"));

    assert!(doc.in_dir().join("appendix/appendix.md").is_file());
    // Without a terminal nothing is confirmed
    assert!(doc.in_dir().join("chapter3").is_dir());

    folio_cmd(doc.path())
        .arg("outline")
        .assert()
        .success()
        .stdout(predicate::str::contains("exists chapter1"))
        .stdout(predicate::str::contains("exists appendix"))
        .stdout(predicate::str::contains("created").not());
}

#[test]
fn test_customize_writes_templates_and_style() {
    let doc = TestDocument::sample().unwrap();
    let style = doc.path().join("style");
    std::fs::create_dir_all(&style).unwrap();
    std::fs::write(style.join("old.css"), "old").unwrap();

    folio_cmd(doc.path()).arg("customize").assert().success();

    assert!(doc.path().join("templates/default.html").is_file());
    assert!(doc.path().join("templates/default.tex").is_file());
    assert!(style.join("default.css").is_file());
    assert!(!style.join("old.css").exists());
}

#[test]
fn test_show_without_output_fails() {
    let doc = TestDocument::sample().unwrap();

    folio_cmd(doc.path())
        .arg("show")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("folio build"));
}

#[test]
fn test_git_command_commits_sources() {
    if !git_available() {
        println!("git not available, skipping");
        return;
    }

    let doc = TestDocument::sample().unwrap();
    doc.write_config("[main]\nout_dir = \"build\"\n").unwrap();

    folio_cmd(doc.path())
        .arg("git")
        .envs(GIT_IDENTITY)
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized repository"));

    assert!(doc.path().join(".git").is_dir());
    let gitignore = std::fs::read_to_string(doc.path().join(".gitignore")).unwrap();
    assert!(gitignore.lines().any(|line| line == "out/"));
    assert!(gitignore.lines().any(|line| line == "build/"));

    let tracked = std::process::Command::new("git")
        .args(["ls-files"])
        .current_dir(doc.path())
        .env_remove("GIT_DIR")
        .env_remove("GIT_WORK_TREE")
        .output()
        .unwrap();
    let tracked = String::from_utf8_lossy(&tracked.stdout);
    assert!(tracked.contains("in/toc.txt"));
    assert!(tracked.contains("folio.toml"));
    assert!(tracked.contains(".gitignore"));
}

#[test]
fn test_doc_dir_from_environment() {
    let doc = TestDocument::sample().unwrap();
    std::fs::create_dir_all(doc.out_dir()).unwrap();

    let mut cmd = assert_cmd::Command::cargo_bin("folio").unwrap();
    cmd.arg("clean")
        .env("FOLIO_DOC_DIR", doc.path())
        .env("FOLIO_CONFIG", doc.path().join("no-global-config.toml"))
        .assert()
        .success();

    assert!(!doc.out_dir().exists());
}
