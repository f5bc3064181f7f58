//! CLI binary integration tests.
//!
//! These tests exercise the compiled `cmdrun` binary to verify command
//! routing, exit status mapping and error handling.

use cmdrun_integration_tests::cmdrun_cmd;

#[test]
fn test_cli_version() {
    let output = cmdrun_cmd()
        .arg("version")
        .output()
        .expect("failed to run cmdrun");
    assert!(output.status.success(), "version command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("cmdrun"),
        "version output should contain 'cmdrun', got: {}",
        stdout
    );
}

#[test]
fn test_cli_help() {
    let output = cmdrun_cmd()
        .arg("--help")
        .output()
        .expect("failed to run cmdrun");
    assert!(output.status.success(), "--help should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["run", "exists", "config"] {
        assert!(
            stdout.contains(command),
            "help output should mention '{}', got: {}",
            command,
            stdout
        );
    }
}

#[test]
fn test_cli_unknown_command() {
    let output = cmdrun_cmd()
        .arg("nonexistent-command")
        .output()
        .expect("failed to run cmdrun");
    assert!(
        !output.status.success(),
        "unknown command should return non-zero exit code"
    );
}

#[test]
fn test_cli_exists() {
    let present = if cfg!(windows) { "cmd.exe" } else { "sh" };
    let output = cmdrun_cmd()
        .args(["exists", present])
        .output()
        .expect("failed to run cmdrun exists");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "true");

    let output = cmdrun_cmd()
        .args(["exists", "absolutely-does-not-exist-ever-please-unicorns"])
        .output()
        .expect("failed to run cmdrun exists");
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "false");
}

#[test]
fn test_cli_run_not_found() {
    let output = cmdrun_cmd()
        .args(["run", "--", "absolutely-does-not-exist-ever-please-unicorns"])
        .output()
        .expect("failed to run cmdrun run");
    assert_eq!(output.status.code(), Some(127));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"), "got: {}", stderr);
}

#[test]
fn test_cli_config_show() {
    let output = cmdrun_cmd()
        .args(["config", "show"])
        .output()
        .expect("failed to run cmdrun config show");
    assert!(output.status.success(), "config show should succeed");

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("config show prints JSON");
    assert_eq!(json["runner"]["log_output_limit"], 1024);
}

#[test]
fn test_cli_rejects_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("cmdrun.json5");
    std::fs::write(&config, "{ runner: { env: { 'A=B': 'C' } } }").unwrap();

    let output = cmdrun_cmd()
        .env("CMDRUN_CONFIG", &config)
        .args(["run", "--", "echo", "never"])
        .output()
        .expect("failed to run cmdrun run");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("A=B"), "got: {}", stderr);
}

#[cfg(unix)]
mod unix {
    use super::*;

    #[test]
    fn test_cli_run_prints_output() {
        let output = cmdrun_cmd()
            .args(["run", "--", "echo", "Hello World!"])
            .output()
            .expect("failed to run cmdrun run");
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout), "Hello World!\n");
    }

    #[test]
    fn test_cli_run_mirrors_exit_status() {
        let output = cmdrun_cmd()
            .args(["run", "--", "sh", "-c", "echo oops >&2; exit 14"])
            .output()
            .expect("failed to run cmdrun run");
        assert_eq!(output.status.code(), Some(14));
        assert!(String::from_utf8_lossy(&output.stderr).contains("oops"));
    }

    #[test]
    fn test_cli_run_env_and_input() {
        let output = cmdrun_cmd()
            .args([
                "run", "--quiet", "--env", "GREETING=hi", "--input", "from stdin", "--", "sh",
                "-c", "echo $GREETING; cat",
            ])
            .output()
            .expect("failed to run cmdrun run");
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout), "hi\nfrom stdin");
    }

    #[test]
    fn test_cli_run_in_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker-file"), "").unwrap();

        let output = cmdrun_cmd()
            .arg("run")
            .arg("--cwd")
            .arg(dir.path())
            .args(["--", "ls"])
            .output()
            .expect("failed to run cmdrun run");
        assert!(output.status.success());
        assert!(String::from_utf8_lossy(&output.stdout).contains("marker-file"));
    }

    #[test]
    fn test_cli_run_uses_config_env() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("cmdrun.json5");
        std::fs::write(&config, "{ runner: { env: { FROM_CONFIG: 'yes' } } }").unwrap();

        let output = cmdrun_cmd()
            .env("CMDRUN_CONFIG", &config)
            .args(["run", "--", "sh", "-c", "echo $FROM_CONFIG"])
            .output()
            .expect("failed to run cmdrun run");
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout), "yes\n");
    }
}
