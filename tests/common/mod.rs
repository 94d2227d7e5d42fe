#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the croutonizer binary.
#[macro_export]
macro_rules! croutonizer {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("croutonizer"))
    };
}

/// One specific section backing its single key fact. The key fact has no
/// evidence span, so the document passes with warnings only.
pub const GROUNDED_CONTENT: &str = r#"{
  "title": "Googlebot Redirect Handling",
  "sections": [
    {
      "heading": "Permanent Redirect Rules for Googlebot",
      "content": "Googlebot follows five redirect hops in a single chain before the crawl stops. Each hop costs one extra request against the crawl budget of the site. A permanent redirect passes link equity to the target URL. Site owners keep chains short by pointing every legacy URL straight at the final destination. Server logs show each hop with the status code."
    }
  ],
  "keyFacts": "Googlebot | follows | five redirect hops"
}"#;

/// [`GROUNDED_CONTENT`] without its key facts.
pub const UNFACTED_CONTENT: &str = r#"{
  "title": "Googlebot Redirect Handling",
  "sections": [
    {
      "heading": "Permanent Redirect Rules for Googlebot",
      "content": "Googlebot follows five redirect hops in a single chain before the crawl stops. Each hop costs one extra request against the crawl budget of the site. A permanent redirect passes link equity to the target URL. Site owners keep chains short by pointing every legacy URL straight at the final destination. Server logs show each hop with the status code."
    }
  ]
}"#;

/// Pipe-delimited key facts supporting [`UNFACTED_CONTENT`].
pub const KEY_FACT_LINES: &str = "Googlebot | follows | five redirect hops\n";

/// Generic header, pronoun openers and no key facts.
pub const FILLER_CONTENT: &str = r#"{
  "title": "Redirects",
  "answerBox": "It is important for SEO. This helps rankings.",
  "sections": [
    { "heading": "Overview", "content": "It helps websites rank better.\n\nThis is powerful and seamless." }
  ]
}"#;

pub const STRICT_CONFIG: &str = r#"version = "1"

[check]
strict = true
"#;

pub const FAIL_BELOW_CONFIG: &str = r#"version = "1"

[check]
fail_below = 100
"#;

/// Creates a temporary directory with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content and returns its path.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Creates `.croutonizer.toml` in the fixture root.
    pub fn create_config(&self, content: &str) {
        self.create_file(".croutonizer.toml", content);
    }

    /// Command rooted in the fixture with the user config directory pointed
    /// inside it, so a developer's own config never leaks into a test.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = croutonizer!();
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"))
            .env_remove("RUST_LOG")
            .env_remove("NO_COLOR");
        cmd
    }

    pub fn read(&self, relative_path: &str) -> String {
        fs::read_to_string(self.dir.path().join(relative_path)).expect("Failed to read file")
    }
}
