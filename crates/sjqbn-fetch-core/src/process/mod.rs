//! External command execution.
//!
//! The fetch flow shells out for `ln`, `mkdir` and `tar`. All of those go
//! through [`ProcessRunner`] so tests can record commands instead of
//! running them.

mod recording;

pub use recording::RecordingRunner;

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// A program plus arguments, run in a given working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    pub program: String,
    pub args: Vec<OsString>,
    pub cwd: PathBuf,
}

impl ExternalCommand {
    pub fn new(program: &str, cwd: &Path) -> Self {
        Self {
            program: program.to_string(),
            args: Vec::new(),
            cwd: cwd.to_path_buf(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }
}

impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for a in &self.args {
            write!(f, " {}", a.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Exit status of a finished command. `code` is `None` when the process
/// was terminated by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    pub code: Option<i32>,
}

impl CommandStatus {
    pub const SUCCESS: CommandStatus = CommandStatus { code: Some(0) };

    pub fn exited(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

pub trait ProcessRunner {
    /// Run `command` to completion. `Err` means it could not be spawned.
    fn run(&self, command: &ExternalCommand) -> io::Result<CommandStatus>;
}

/// Runs commands with `std::process::Command`, inheriting stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, command: &ExternalCommand) -> io::Result<CommandStatus> {
        tracing::debug!("exec `{}` in {}", command, command.cwd.display());
        let status = Command::new(&command.program)
            .args(&command.args)
            .current_dir(&command.cwd)
            .status()?;
        Ok(CommandStatus {
            code: status.code(),
        })
    }
}
