//! Environment merging with per-platform key comparison.

use crate::error::RunnerError;
use crate::Result;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::ffi::{OsStr, OsString};

/// How environment variable names are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyComparison {
    /// `PATH` and `Path` are different variables.
    CaseSensitive,
    /// `PATH` and `Path` name the same variable.
    CaseInsensitive,
}

impl KeyComparison {
    /// Keys that are not UTF-8 are compared byte for byte.
    fn fold(&self, key: &OsStr) -> OsString {
        match (self, key.to_str()) {
            (Self::CaseInsensitive, Some(key)) => key.to_uppercase().into(),
            _ => key.to_os_string(),
        }
    }
}

/// Environment semantics of a target platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    /// Key comparison rule.
    pub key_comparison: KeyComparison,

    /// Whether a process can be launched with a replaced environment table.
    pub supports_isolated_env: bool,
}

impl Platform {
    /// Unix-like platforms.
    pub const UNIX: Platform = Platform {
        key_comparison: KeyComparison::CaseSensitive,
        supports_isolated_env: true,
    };

    /// Windows.
    pub const WINDOWS: Platform = Platform {
        key_comparison: KeyComparison::CaseInsensitive,
        supports_isolated_env: false,
    };

    /// The platform this binary was built for.
    pub fn native() -> Self {
        if cfg!(windows) {
            Self::WINDOWS
        } else {
            Self::UNIX
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::native()
    }
}

/// A fully merged environment, sorted by key.
///
/// Keys and values are OS strings, so inherited variables that are not
/// UTF-8 reach the child unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedEnvironment {
    vars: Vec<(OsString, OsString)>,
}

impl ResolvedEnvironment {
    /// Iterate over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.vars.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str()))
    }

    /// Look up a variable by its exact key.
    pub fn get(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        let key = key.as_ref();
        self.vars
            .iter()
            .find(|(k, _)| k.as_os_str() == key)
            .map(|(_, v)| v.as_os_str())
    }

    /// Check if a variable with this exact key is present.
    pub fn contains_key(&self, key: impl AsRef<OsStr>) -> bool {
        self.get(key).is_some()
    }

    /// Render as `KEY=VALUE` strings, replacing invalid UTF-8.
    pub fn to_assignments(&self) -> Vec<String> {
        self.vars
            .iter()
            .map(|(k, v)| format!("{}={}", k.to_string_lossy(), v.to_string_lossy()))
            .collect()
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Check if no variables are set.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Combines the ambient environment with a command's explicit variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvironmentMerger {
    platform: Platform,
}

impl EnvironmentMerger {
    /// Create a merger for the given platform.
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }

    /// Get the platform.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Merge `explicit` into `ambient`.
    ///
    /// With `isolated` set the ambient environment is ignored entirely.
    /// Explicit variables always win over ambient ones. When keys compare
    /// case-insensitively, explicit keys that differ only by case are
    /// deduplicated by sorting them and keeping the first, so the outcome
    /// does not depend on map iteration order.
    pub fn merge<I>(
        &self,
        ambient: I,
        explicit: &HashMap<String, String>,
        isolated: bool,
    ) -> Result<ResolvedEnvironment>
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        if isolated && !self.platform.supports_isolated_env {
            return Err(RunnerError::PlatformUnsupported(
                "isolated environments cannot be expressed by this platform's process launcher"
                    .to_string(),
            ));
        }

        let mut vars = match self.platform.key_comparison {
            KeyComparison::CaseSensitive => {
                let mut merged: BTreeMap<OsString, OsString> = BTreeMap::new();
                if !isolated {
                    merged.extend(ambient);
                }
                merged.extend(explicit.iter().map(|(k, v)| (k.into(), v.into())));
                merged.into_iter().collect::<Vec<_>>()
            }
            KeyComparison::CaseInsensitive => {
                let comparison = self.platform.key_comparison;

                let mut keys: Vec<&String> = explicit.keys().collect();
                keys.sort();

                let mut seen = HashSet::new();
                let mut overrides = Vec::with_capacity(keys.len());
                for key in keys {
                    if seen.insert(comparison.fold(OsStr::new(key))) {
                        overrides.push((OsString::from(key), OsString::from(&explicit[key])));
                    }
                }

                let mut merged: Vec<(OsString, OsString)> = if isolated {
                    Vec::new()
                } else {
                    ambient
                        .into_iter()
                        .filter(|(k, _)| !seen.contains(&comparison.fold(k)))
                        .collect()
                };
                merged.extend(overrides);
                merged
            }
        };

        vars.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(ResolvedEnvironment { vars })
    }
}
