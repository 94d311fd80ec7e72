//! Runner that records commands instead of executing them.

use super::{CommandStatus, ExternalCommand, ProcessRunner};
use std::cell::RefCell;
use std::collections::HashMap;
use std::io;

/// Records every command and answers with a scripted status per program
/// (success unless overridden with [`RecordingRunner::fail_with`]).
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: RefCell<Vec<ExternalCommand>>,
    statuses: HashMap<String, CommandStatus>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every invocation of `program` exit with `code`.
    pub fn fail_with(mut self, program: &str, code: i32) -> Self {
        self.statuses
            .insert(program.to_string(), CommandStatus::exited(code));
        self
    }

    pub fn calls(&self) -> Vec<ExternalCommand> {
        self.calls.borrow().clone()
    }

    /// Programs invoked so far, in order.
    pub fn programs(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.program.clone()).collect()
    }
}

impl ProcessRunner for RecordingRunner {
    fn run(&self, command: &ExternalCommand) -> io::Result<CommandStatus> {
        self.calls.borrow_mut().push(command.clone());
        Ok(self
            .statuses
            .get(&command.program)
            .copied()
            .unwrap_or(CommandStatus::SUCCESS))
    }
}
