//! Shared test infrastructure for taskbook integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use taskbook::{CommandError, Interpreter, Response};
use tempfile::TempDir;

/// Test environment with automatic cleanup: a temp directory holding the
/// task file and an interpreter opened over it.
pub struct TestEnv {
    pub temp_dir: TempDir,
    pub interpreter: Interpreter,
}

impl TestEnv {
    /// Create a new test environment over a fresh (nonexistent) task file.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let interpreter =
            Interpreter::open(temp_dir.path().join("tasks.txt")).expect("Failed to open");
        Self {
            temp_dir,
            interpreter,
        }
    }

    pub fn task_file(&self) -> PathBuf {
        self.temp_dir.path().join("tasks.txt")
    }

    /// Handle a command and return the response text.
    pub fn handle(&mut self, line: &str) -> String {
        self.interpreter.handle(line).text().to_string()
    }

    /// Handle a command, surfacing the typed result.
    pub fn eval(&mut self, line: &str) -> Result<Response, CommandError> {
        self.interpreter.eval(line)
    }

    /// Reopen the interpreter over the same file, simulating a new session.
    pub fn reopen(&mut self) {
        self.interpreter = Interpreter::open(self.task_file()).expect("Failed to reopen");
    }

    /// Raw contents of the task file.
    pub fn file_contents(&self) -> String {
        std::fs::read_to_string(self.task_file()).expect("Failed to read task file")
    }

    /// Display form of the task at the given zero-based index.
    pub fn display_of(&self, index: usize) -> String {
        self.interpreter.tasks().all()[index].to_string()
    }
}
