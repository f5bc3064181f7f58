//! # cmdrun-core
//!
//! Configuration, environment, and path utilities shared by the cmdrun crates.
//!
//! - **Configuration**: loading and validating the JSON5 config file
//! - **Environment**: ambient environment snapshots and typed lookups
//! - **Paths**: default locations of cmdrun files

pub mod config;
pub mod env;
pub mod error;
pub mod paths;

// Re-exports for convenience
pub use config::{Config, LoggingConfig, RunnerConfig};
pub use error::{ConfigError, Result};
