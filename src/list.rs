//! The ordered task collection. Owns the sequence of tasks and its storage;
//! every mutation rewrites the backing file before returning.

use crate::error::CommandError;
use crate::storage::{Storage, StorageError};
use crate::task::Task;
use chrono::NaiveDate;

/// The single owner of the task sequence. Tasks have no identity beyond
/// their position, so indices must be re-validated against the current size
/// on every call.
pub struct TaskList {
    tasks: Vec<Task>,
    storage: Storage,
}

impl TaskList {
    /// An empty list over the given storage.
    pub fn new(storage: Storage) -> Self {
        Self {
            tasks: Vec::new(),
            storage,
        }
    }

    /// Load the list from the backing file. Returns the list together with
    /// the number of corrupted lines that were skipped.
    pub fn load(storage: Storage) -> Result<(Self, usize), StorageError> {
        let outcome = storage.load()?;
        Ok((
            Self {
                tasks: outcome.tasks,
                storage,
            },
            outcome.skipped,
        ))
    }

    /// Append a task and persist.
    ///
    /// On a save failure the task stays in memory; the caller sees the
    /// failure and the next successful mutation writes it out.
    pub fn add(&mut self, task: Task) -> Result<(), CommandError> {
        self.tasks.push(task);
        self.storage.save(&self.tasks)?;
        Ok(())
    }

    /// Remove and return the task at `index` (zero-based), then persist.
    /// All later tasks shift down by one.
    pub fn delete(&mut self, index: usize) -> Result<Task, CommandError> {
        self.check_index(index)?;
        let removed = self.tasks.remove(index);
        self.storage.save(&self.tasks)?;
        Ok(removed)
    }

    /// Set the done flag on the task at `index` (zero-based), then persist.
    /// Idempotent: re-marking a done task leaves it done.
    pub fn set_done(&mut self, index: usize, done: bool) -> Result<&Task, CommandError> {
        self.check_index(index)?;
        self.tasks[index].set_done(done);
        self.storage.save(&self.tasks)?;
        Ok(&self.tasks[index])
    }

    fn check_index(&self, index: usize) -> Result<(), CommandError> {
        if index >= self.tasks.len() {
            return Err(CommandError::InvalidIndex {
                index: index as i64 + 1,
            });
        }
        Ok(())
    }

    /// Case-insensitive substring search against descriptions, in original
    /// order.
    pub fn find(&self, keyword: &str) -> Vec<&Task> {
        let needle = keyword.to_lowercase();
        self.tasks
            .iter()
            .filter(|t| t.description().to_lowercase().contains(&needle))
            .collect()
    }

    /// Tasks falling on the given calendar date (see [`Task::occurs_on`]).
    pub fn on_date(&self, date: NaiveDate) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.occurs_on(date)).collect()
    }

    /// Borrowed view of all tasks in order.
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
