//! Where config files are looked up, kept behind a trait so discovery can be
//! tested against an in-memory tree.

use std::io;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "croutonizer";

pub trait FileSystem {
    /// Contents of `path`, or `None` when nothing is there.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read.
    fn read_if_exists(&self, path: &Path) -> io::Result<Option<String>>;

    /// # Errors
    /// Returns an error if the current directory cannot be determined.
    fn current_dir(&self) -> io::Result<PathBuf>;

    /// Per-user config directory (`~/.config/croutonizer` on Linux,
    /// `%APPDATA%\croutonizer` on Windows, `~/Library/Application Support/croutonizer` on macOS).
    fn config_dir(&self) -> Option<PathBuf>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_if_exists(&self, path: &Path) -> io::Result<Option<String>> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn config_dir(&self) -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
    }
}
