use std::path::{Path, PathBuf};

use crate::error::{CroutonizerError, Result};
use crate::vocabulary::Vocabulary;

use super::filesystem::{FileSystem, RealFileSystem};
use super::model::{CONFIG_VERSION, Config};

/// Trait for loading configuration from various sources.
pub trait ConfigLoader {
    /// Load configuration from the default location.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be read or parsed.
    fn load(&self) -> Result<Config>;

    /// Load configuration from a specific path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    fn load_from_path(&self, path: &Path) -> Result<Config>;
}

pub const LOCAL_CONFIG_NAME: &str = ".croutonizer.toml";
const USER_CONFIG_NAME: &str = "config.toml";

const CHECK_KEYS: &[&str] = &["strict", "top_fixes", "fail_below"];

fn validate_config_version(config: &Config) -> Result<()> {
    match &config.version {
        None => Ok(()),
        Some(v) if v == CONFIG_VERSION => Ok(()),
        Some(v) => Err(CroutonizerError::Config(format!(
            "Unsupported config version '{v}'. Only version '{CONFIG_VERSION}' is supported."
        ))),
    }
}

/// Keys serde would silently drop, as dotted paths.
fn unknown_keys(table: &toml::Table) -> Vec<String> {
    let vocabulary_keys = vocabulary_keys();
    let mut unknown = Vec::new();
    for (key, item) in table {
        let known: Vec<&str> = match key.as_str() {
            "version" => continue,
            "check" => CHECK_KEYS.to_vec(),
            "vocabulary" => vocabulary_keys.iter().map(String::as_str).collect(),
            _ => {
                unknown.push(key.clone());
                continue;
            }
        };
        if let Some(section) = item.as_table() {
            unknown.extend(
                section
                    .keys()
                    .filter(|k| !known.contains(&k.as_str()))
                    .map(|k| format!("{key}.{k}")),
            );
        }
    }
    unknown
}

/// Field names of the `[vocabulary]` table.
fn vocabulary_keys() -> Vec<String> {
    toml::Value::try_from(Vocabulary::default())
        .ok()
        .and_then(|value| value.as_table().map(|t| t.keys().cloned().collect()))
        .unwrap_or_default()
}

/// Loads configuration from the filesystem.
///
/// Search order:
/// 1. `.croutonizer.toml` in the current directory
/// 2. `config.toml` in the platform user config directory
/// 3. `Config::default()` if neither exists
#[derive(Debug)]
pub struct FileConfigLoader<F: FileSystem = RealFileSystem> {
    fs: F,
}

impl Default for FileConfigLoader<RealFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl FileConfigLoader<RealFileSystem> {
    #[must_use]
    pub const fn new() -> Self {
        Self { fs: RealFileSystem }
    }
}

impl<F: FileSystem> FileConfigLoader<F> {
    #[must_use]
    pub const fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    fn local_config_path(&self) -> Option<PathBuf> {
        self.fs
            .current_dir()
            .ok()
            .map(|dir| dir.join(LOCAL_CONFIG_NAME))
    }

    fn user_config_path(&self) -> Option<PathBuf> {
        self.fs.config_dir().map(|dir| dir.join(USER_CONFIG_NAME))
    }

    fn read(&self, path: &Path) -> Result<Option<String>> {
        self.fs
            .read_if_exists(path)
            .map_err(|source| CroutonizerError::FileRead {
                path: path.to_path_buf(),
                source,
            })
    }

    fn parse_config(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content)?;
        let table: toml::Table = toml::from_str(content)?;
        for key in unknown_keys(&table) {
            tracing::warn!("ignoring unknown config key `{key}`");
        }
        validate_config_version(&config)?;
        Ok(config)
    }
}

impl<F: FileSystem> ConfigLoader for FileConfigLoader<F> {
    fn load(&self) -> Result<Config> {
        for path in [self.local_config_path(), self.user_config_path()]
            .into_iter()
            .flatten()
        {
            if let Some(content) = self.read(&path)? {
                tracing::debug!(path = %path.display(), "loading config");
                return Self::parse_config(&content);
            }
        }
        Ok(Config::default())
    }

    fn load_from_path(&self, path: &Path) -> Result<Config> {
        let content = self.read(path)?.ok_or_else(|| CroutonizerError::FileRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        })?;
        Self::parse_config(&content)
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
