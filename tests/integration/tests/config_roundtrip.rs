//! Config write/load roundtrip integration tests.

use cmdrun_core::config::{Config, LogLevel};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[test]
fn test_config_write_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cmdrun.json5");

    let mut config = Config::default();
    config.runner.log_output_limit = 64;
    config.runner.env = BTreeMap::from([("FOO".to_string(), "BAR".to_string())]);
    config.runner.working_dir = Some(PathBuf::from("/tmp"));
    config.logging.level = LogLevel::Debug;
    std::fs::write(&path, config.to_json5().unwrap()).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded, config);
    assert!(loaded.validate().is_ok());
}

#[test]
fn test_config_load_nonexistent() {
    let result = Config::load(Path::new("/nonexistent/cmdrun.json5"));
    assert!(result.is_err());

    let fallback = Config::load_or_default(Some(Path::new("/nonexistent/cmdrun.json5"))).unwrap();
    assert_eq!(fallback, Config::default());
}

#[test]
fn test_config_parse_invalid() {
    assert!(Config::parse("not valid json5").is_err());
}
