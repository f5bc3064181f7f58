//! Helpers shared by the workspace integration tests.

use std::path::PathBuf;
use std::process::Command;

/// Locate the compiled `cmdrun` binary in the workspace target directory.
///
/// Honors `CARGO_TARGET_DIR`, otherwise looks in `<workspace>/target/debug`.
pub fn cmdrun_bin() -> PathBuf {
    let target_dir = match std::env::var_os("CARGO_TARGET_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            // tests/integration -> workspace root
            let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
            let workspace_root = manifest_dir
                .parent()
                .and_then(|tests| tests.parent())
                .expect("workspace root");
            workspace_root.join("target")
        }
    };

    let bin = target_dir
        .join("debug")
        .join(format!("cmdrun{}", std::env::consts::EXE_SUFFIX));
    assert!(
        bin.exists(),
        "cmdrun binary not found at {}; run `cargo build -p cmdrun-cli` first",
        bin.display()
    );
    bin
}

/// A `cmdrun` invocation that ignores the user's config file and log filter.
pub fn cmdrun_cmd() -> Command {
    let mut cmd = Command::new(cmdrun_bin());
    cmd.env("CMDRUN_CONFIG", "/nonexistent/cmdrun.json5")
        .env_remove("CMDRUN_LOG");
    cmd
}
