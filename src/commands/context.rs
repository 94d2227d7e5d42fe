use std::error::Error as _;
use std::fs;
use std::path::Path;

use crate::config::{Config, ConfigLoader, FileConfigLoader};
use crate::error::CroutonizerError;
use crate::output::{ColorMode, ErrorOutput};

/// Loads configuration from `config_path`, or by discovery when none is given.
pub(crate) fn load_config(config_path: Option<&Path>, no_config: bool) -> crate::Result<Config> {
    if no_config {
        return Ok(Config::default());
    }

    let loader = FileConfigLoader::new();
    config_path.map_or_else(|| loader.load(), |path| loader.load_from_path(path))
}

pub(crate) fn write_output(
    output_path: Option<&Path>,
    content: &str,
    quiet: bool,
) -> crate::Result<()> {
    if let Some(path) = output_path {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
    } else if !quiet {
        print!("{content}");
    }
    Ok(())
}

/// Prints `err` with its underlying cause and a hint, when one exists.
pub(crate) fn report_error(err: &CroutonizerError, color: ColorMode) {
    let detail = err.source().map(ToString::to_string);
    ErrorOutput::new(color).print_error_with_detail(
        err.error_type(),
        &err.to_string(),
        detail.as_deref(),
        err.suggestion(),
    );
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
