//! Path resolution utilities.

use crate::env::{self, vars};
use crate::error::ConfigError;
use std::path::PathBuf;

/// Get the cmdrun base directory (~/.cmdrun).
pub fn base_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or_else(|| {
        ConfigError::Validation("Could not determine home directory".to_string())
    })?;
    Ok(home.join(".cmdrun"))
}

/// Get the config file path.
///
/// `CMDRUN_CONFIG` overrides the default `~/.cmdrun/cmdrun.json5`.
pub fn config_file() -> Result<PathBuf, ConfigError> {
    if let Some(path) = env::get_var(vars::CMDRUN_CONFIG) {
        return Ok(PathBuf::from(path));
    }
    Ok(base_dir()?.join("cmdrun.json5"))
}
