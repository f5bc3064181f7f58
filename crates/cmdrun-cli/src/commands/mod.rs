//! CLI command implementations.

pub mod config;
pub mod exists;
pub mod run;
