//! Environment variable handling.

use std::env;
use std::ffi::OsString;

/// Get an environment variable, returning None if not set or empty.
pub fn get_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
pub fn get_var_or(name: &str, default: &str) -> String {
    get_var(name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable as a boolean.
pub fn get_bool(name: &str) -> bool {
    get_var(name).map(|v| parse_bool(&v)).unwrap_or(false)
}

fn parse_bool(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// Take a snapshot of the current process environment.
///
/// Entries are kept as raw OS strings, including ones that are not UTF-8.
pub fn snapshot() -> Vec<(OsString, OsString)> {
    env::vars_os().collect()
}

/// Split a `KEY=VALUE` assignment.
///
/// Only the first `=` separates, so values may contain `=`. Returns `None`
/// when there is no `=` or the key is empty.
pub fn parse_assignment(assignment: &str) -> Option<(String, String)> {
    let (key, value) = assignment.split_once('=')?;
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), value.to_string()))
}

/// Common environment variable names.
pub mod vars {
    /// cmdrun config file override.
    pub const CMDRUN_CONFIG: &str = "CMDRUN_CONFIG";

    /// cmdrun log filter.
    pub const CMDRUN_LOG: &str = "CMDRUN_LOG";
}
