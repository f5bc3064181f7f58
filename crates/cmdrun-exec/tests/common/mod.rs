//! Shared fixtures for command runner tests.

#![allow(dead_code)]

use cmdrun_exec::CommandSpec;
use std::collections::HashMap;

/// Exit code used by the `exit` fixture command.
pub const ERR_EXIT_CODE: i32 = 14;

/// Logical operations with an equivalent command on every platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Pwd,
    Stderr,
    Exit,
    Ls,
    Env,
    Echo,
}

/// Pure data describing one platform command.
#[derive(Debug, Clone)]
pub struct PlatformCommand {
    pub name: &'static str,
    pub args: Vec<String>,
    pub working_dir: Option<&'static str>,
    pub env: Vec<(&'static str, &'static str)>,
}

impl PlatformCommand {
    pub fn to_spec(&self) -> CommandSpec {
        let mut spec = CommandSpec::new(self.name)
            .args(self.args.iter().cloned())
            .envs(self.env.iter().copied());
        if let Some(dir) = self.working_dir {
            spec = spec.working_dir(dir);
        }
        spec
    }
}

fn command(name: &'static str, args: &[&str]) -> PlatformCommand {
    PlatformCommand {
        name,
        args: args.iter().map(|a| a.to_string()).collect(),
        working_dir: None,
        env: Vec::new(),
    }
}

fn unix_commands() -> HashMap<Op, PlatformCommand> {
    let exit = format!("exit {}", ERR_EXIT_CODE);
    HashMap::from([
        (
            Op::Pwd,
            PlatformCommand {
                working_dir: Some("/tmp"),
                ..command("sh", &["-c", "pwd"])
            },
        ),
        (Op::Stderr, command("sh", &["-c", "echo error-output >&2"])),
        (Op::Exit, command("sh", &["-c", exit.as_str()])),
        (
            Op::Ls,
            PlatformCommand {
                working_dir: Some("."),
                ..command("ls", &["-l"])
            },
        ),
        (
            Op::Env,
            PlatformCommand {
                env: vec![("FOO", "BAR")],
                ..command("env", &[])
            },
        ),
        (Op::Echo, command("echo", &["Hello World!"])),
    ])
}

fn windows_commands() -> HashMap<Op, PlatformCommand> {
    let exit = format!("exit {}", ERR_EXIT_CODE);
    HashMap::from([
        (
            Op::Pwd,
            PlatformCommand {
                working_dir: Some(r"C:\windows\temp"),
                ..command("powershell", &["echo $PWD"])
            },
        ),
        (
            Op::Stderr,
            command("powershell", &["[Console]::Error.WriteLine('error-output')"]),
        ),
        (Op::Exit, command("powershell", &[exit.as_str()])),
        (
            Op::Ls,
            PlatformCommand {
                working_dir: Some("."),
                ..command("powershell", &["dir"])
            },
        ),
        (
            Op::Env,
            PlatformCommand {
                env: vec![("FOO", "BAR")],
                ..command("cmd.exe", &["/C", "SET"])
            },
        ),
        (Op::Echo, command("powershell", &["Write-Host", "Hello World!"])),
    ])
}

/// The command implementing `op` on the current platform.
pub fn platform_command(op: Op) -> PlatformCommand {
    let table = if cfg!(windows) {
        windows_commands()
    } else {
        unix_commands()
    };
    table[&op].clone()
}

/// Parse `KEY=VALUE` lines from an environment dump.
///
/// Only the first `=` separates, since values may contain `=`.
pub fn parse_env_fields(dump: &str, uppercase_keys: bool) -> HashMap<String, String> {
    dump.replace('\r', "")
        .lines()
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let key = if uppercase_keys {
                key.to_uppercase()
            } else {
                key.to_string()
            };
            (key, value.to_string())
        })
        .collect()
}
