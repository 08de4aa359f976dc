//! The request/response core: one command line in, one response string out.
//!
//! Each call is independent; the only state is the task list (and its
//! backing file). Shells talk to the interpreter through [`handle`], which
//! never fails: every command-level error is rendered to a user-facing
//! message. Embedders and tests that want the typed result use [`eval`].
//!
//! [`handle`]: Interpreter::handle
//! [`eval`]: Interpreter::eval

use crate::command::Command;
use crate::error::CommandError;
use crate::list::TaskList;
use crate::storage::{Storage, StorageError};
use crate::task::Task;
use chrono::NaiveDate;
use std::path::PathBuf;

/// Outcome of one handled command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// An ordinary response; the session continues.
    Message(String),
    /// The goodbye response; the shell should terminate after showing it.
    Farewell(String),
}

impl Response {
    pub fn text(&self) -> &str {
        match self {
            Response::Message(text) | Response::Farewell(text) => text,
        }
    }

    pub fn is_farewell(&self) -> bool {
        matches!(self, Response::Farewell(_))
    }
}

/// The top-level core handle: owns the task list, dispatches parsed
/// commands against it.
pub struct Interpreter {
    list: TaskList,
    skipped_on_load: usize,
}

impl Interpreter {
    /// Open the interpreter over the task file at `path`, loading any
    /// previously saved tasks. Corrupted lines are skipped; the count is
    /// available through [`skipped_on_load`].
    ///
    /// [`skipped_on_load`]: Interpreter::skipped_on_load
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let storage = Storage::new(path);
        let (list, skipped) = TaskList::load(storage)?;
        log::info!(
            "loaded {} task(s), skipped {} corrupted line(s)",
            list.len(),
            skipped
        );
        Ok(Self {
            list,
            skipped_on_load: skipped,
        })
    }

    /// Number of corrupted lines skipped while loading the task file.
    pub fn skipped_on_load(&self) -> usize {
        self.skipped_on_load
    }

    /// Read view of the task list.
    pub fn tasks(&self) -> &TaskList {
        &self.list
    }

    /// Handle one command line, converting any error into its user-facing
    /// message. Never terminates the session; `bye` is signalled through
    /// [`Response::Farewell`].
    pub fn handle(&mut self, line: &str) -> Response {
        match self.eval(line) {
            Ok(response) => response,
            Err(e) => Response::Message(format!("Oops: {}.", e)),
        }
    }

    /// Handle one command line, surfacing the typed error.
    pub fn eval(&mut self, line: &str) -> Result<Response, CommandError> {
        let command = Command::parse(line)?;
        log::debug!("executing {:?}", command);

        match command {
            Command::Bye => Ok(Response::Farewell(
                "Bye! Your tasks are saved. See you next time.".to_string(),
            )),
            Command::List => Ok(Response::Message(self.render_list())),
            Command::ListOn(date) => Ok(Response::Message(self.render_on_date(date))),
            Command::Find(keyword) => Ok(Response::Message(self.render_find(&keyword))),
            Command::Mark(index) => {
                let task = self.list.set_done(index, true)?;
                Ok(Response::Message(format!(
                    "Nice! I've marked this task as done:\n  {}",
                    task
                )))
            }
            Command::Unmark(index) => {
                let task = self.list.set_done(index, false)?;
                Ok(Response::Message(format!(
                    "OK, I've marked this task as not done yet:\n  {}",
                    task
                )))
            }
            Command::Delete(index) => {
                let removed = self.list.delete(index)?;
                Ok(Response::Message(format!(
                    "Removed this task:\n  {}\nNow you have {} task(s) in the list.",
                    removed,
                    self.list.len()
                )))
            }
            Command::Add(task) => {
                let shown = task.to_string();
                self.list.add(task)?;
                Ok(Response::Message(format!(
                    "Got it, I've added this task:\n  {}\nNow you have {} task(s) in the list.",
                    shown,
                    self.list.len()
                )))
            }
        }
    }

    fn render_list(&self) -> String {
        if self.list.is_empty() {
            return "There are no tasks in your list yet.".to_string();
        }
        let mut out = String::from("Here are the tasks in your list:");
        for (i, task) in self.list.all().iter().enumerate() {
            out.push_str(&format!("\n{}. {}", i + 1, task));
        }
        out
    }

    fn render_on_date(&self, date: NaiveDate) -> String {
        let matches = self.list.on_date(date);
        let date_shown = date.format("%b %d %Y");
        if matches.is_empty() {
            return format!("No tasks on {}.", date_shown);
        }
        let mut out = format!("Here are the tasks on {}:", date_shown);
        render_numbered(&mut out, &matches);
        out
    }

    fn render_find(&self, keyword: &str) -> String {
        let matches = self.list.find(keyword);
        if matches.is_empty() {
            return "No matching tasks found.".to_string();
        }
        let mut out = String::from("Here are the matching tasks in your list:");
        render_numbered(&mut out, &matches);
        out
    }
}

fn render_numbered(out: &mut String, tasks: &[&Task]) {
    for (i, task) in tasks.iter().enumerate() {
        out.push_str(&format!("\n{}. {}", i + 1, task));
    }
}
