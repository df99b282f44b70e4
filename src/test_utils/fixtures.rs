//! Document fixtures.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::assets::{self, SAMPLE_FILES};
use crate::config::DocConfig;
use crate::constants::CONFIG_FILENAME;
use crate::project::Project;

const CONVERTER_LOG: &str = "converter-calls.log";
const CALL_SEPARATOR: &str = "--- end of call ---";

/// A document directory in a temporary location, using the default layout
/// (`in/`, `out/`, `toc.txt`, `.md`).
pub struct TestDocument {
    _temp: TempDir,
    root: PathBuf,
}

impl TestDocument {
    /// An empty document directory.
    pub fn new() -> Result<Self> {
        let temp = TempDir::new().context("Failed to create temp dir")?;
        let root = temp.path().join("doc");
        fs::create_dir_all(&root)?;
        Ok(Self {
            _temp: temp,
            root,
        })
    }

    /// A document holding the bundled sample chapters.
    pub fn sample() -> Result<Self> {
        let doc = Self::new()?;
        assets::materialize(SAMPLE_FILES, &doc.in_dir())?;
        Ok(doc)
    }

    /// The document directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// `<doc>/in`
    #[must_use]
    pub fn in_dir(&self) -> PathBuf {
        self.root.join("in")
    }

    /// `<doc>/out`
    #[must_use]
    pub fn out_dir(&self) -> PathBuf {
        self.root.join("out")
    }

    /// Writes `folio.toml`.
    pub fn write_config(&self, content: &str) -> Result<()> {
        fs::write(self.root.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    /// Writes `in/toc.txt`, one line per entry.
    pub fn write_toc(&self, lines: &[&str]) -> Result<()> {
        fs::create_dir_all(self.in_dir())?;
        let mut content = lines.join("\n");
        content.push('\n');
        fs::write(self.in_dir().join("toc.txt"), content)?;
        Ok(())
    }

    /// Writes `in/<id>/<id>.md`.
    pub fn add_chapter(&self, id: &str, content: &str) -> Result<PathBuf> {
        let dir = self.in_dir().join(id);
        fs::create_dir_all(&dir)?;
        let path = dir.join(format!("{id}.md"));
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Writes `in/<id>/img/<name>`.
    pub fn add_image(&self, id: &str, name: &str, content: &[u8]) -> Result<()> {
        let dir = self.in_dir().join(id).join("img");
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(name), content)?;
        Ok(())
    }

    /// Loads the document the way the CLI does.
    pub async fn project(&self) -> Result<Project> {
        let config = DocConfig::load(&self.root, None)
            .await?
            .with_override("doc_dir", self.root.display().to_string());
        Project::new(config)
    }

    /// Installs a converter script and points `pandoc_cmd` at it through
    /// `folio.toml`.
    ///
    /// The script appends its arguments to a log (see [`Self::converter_calls`])
    /// and writes a small file to the path after `-o`. If `fail_extension` is
    /// given, runs whose output ends with it print to stderr and exit 2.
    #[cfg(unix)]
    pub fn install_fake_converter(&self, fail_extension: Option<&str>) -> Result<PathBuf> {
        use std::os::unix::fs::PermissionsExt;

        let bin_dir = self.root.join("bin");
        fs::create_dir_all(&bin_dir)?;
        let script_path = bin_dir.join("fake-pandoc");
        let log_path = self.root.join(CONVERTER_LOG);
        let fail = fail_extension.map_or(String::new(), |ext| {
            format!(
                "case \"$out\" in *.{ext}) echo \"fake converter: cannot produce {ext}\" >&2; exit 2;; esac\n"
            )
        });

        let script = format!(
            "#!/bin/sh\n\
             printf '%s\\n' \"$@\" >> '{log}'\n\
             echo '{sep}' >> '{log}'\n\
             pwd >> '{log}.cwd'\n\
             out=''\n\
             prev=''\n\
             for arg in \"$@\"; do\n\
             if [ \"$prev\" = '-o' ]; then out=\"$arg\"; fi\n\
             prev=\"$arg\"\n\
             done\n\
             {fail}\
             echo 'generated by fake converter' > \"$out\"\n",
            log = log_path.display(),
            sep = CALL_SEPARATOR,
        );
        fs::write(&script_path, script)?;
        fs::set_permissions(&script_path, fs::Permissions::from_mode(0o755))?;

        let cmd = toml::Value::String(script_path.display().to_string());
        self.write_config(&format!("[main]\npandoc_cmd = {cmd}\n"))?;
        Ok(script_path)
    }

    /// Argument lists of every fake converter run, in order.
    pub fn converter_calls(&self) -> Result<Vec<Vec<String>>> {
        let path = self.root.join(CONVERTER_LOG);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path)?;

        let mut calls = Vec::new();
        let mut current = Vec::new();
        for line in content.lines() {
            if line == CALL_SEPARATOR {
                calls.push(std::mem::take(&mut current));
            } else {
                current.push(line.to_string());
            }
        }
        Ok(calls)
    }

    /// Working directories of every fake converter run, in order.
    pub fn converter_dirs(&self) -> Result<Vec<PathBuf>> {
        let path = self.root.join(format!("{CONVERTER_LOG}.cwd"));
        if !path.exists() {
            return Ok(Vec::new());
        }
        Ok(fs::read_to_string(&path)?.lines().map(PathBuf::from).collect())
    }
}
