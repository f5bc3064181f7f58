//! Configuration loading and persistence.

use super::Config;
use crate::error::ConfigError;
use crate::paths;
use std::fs;
use std::path::Path;

impl Config {
    /// Load configuration from the default path.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = paths::config_file()?;
        Self::load(&path)
    }

    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        json5::from_str(content).map_err(|e| ConfigError::Json5(e.to_string()))
    }

    /// Load configuration from `path` (or the default path), falling back
    /// to defaults when the file does not exist.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let result = match path {
            Some(path) => Self::load(path),
            None => Self::load_default(),
        };

        match result {
            Ok(config) => Ok(config),
            Err(ConfigError::NotFound(path)) => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Serialize to a pretty JSON string (valid JSON5).
    pub fn to_json5(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validate the configuration, collecting all errors before returning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.runner.log_output_limit == 0 {
            errors.push("runner.log_output_limit must be greater than 0".to_string());
        }

        for key in self.runner.env.keys() {
            if key.is_empty() {
                errors.push("runner.env contains an empty variable name".to_string());
            } else if key.contains('=') || key.contains('\0') {
                errors.push(format!("runner.env: invalid variable name '{}'", key));
            }
        }

        if let Some(dir) = &self.runner.working_dir {
            if dir.as_os_str().is_empty() {
                errors.push("runner.working_dir must not be empty".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors.join("; ")))
        }
    }
}
