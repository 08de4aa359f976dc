//! Flat-file persistence: one encoded line per task, rewritten in full on
//! every save.

use crate::task::Task;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// An I/O failure while reading or writing the task file.
#[derive(Debug)]
pub struct StorageError {
    path: PathBuf,
    source: io::Error,
}

impl StorageError {
    fn new(path: &Path, source: io::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "storage error at {}: {}",
            self.path.display(),
            self.source
        )
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Result of loading the task file.
pub struct LoadOutcome {
    /// Tasks decoded successfully, in file order.
    pub tasks: Vec<Task>,
    /// Number of non-blank lines that failed to decode and were skipped.
    pub skipped: usize,
}

/// Handle on the backing file.
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the backing file with one encoded line per task, in order.
    /// Creates parent directories as needed.
    pub fn save(&self, tasks: &[Task]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StorageError::new(&self.path, e))?;
            }
        }

        let mut file = File::create(&self.path).map_err(|e| StorageError::new(&self.path, e))?;
        for task in tasks {
            writeln!(file, "{}", task.encode()).map_err(|e| StorageError::new(&self.path, e))?;
        }
        Ok(())
    }

    /// Read the backing file. A missing file yields an empty outcome, not an
    /// error. A line that fails to decode is skipped with a warning and
    /// counted in the outcome; blank lines are ignored silently.
    pub fn load(&self) -> Result<LoadOutcome, StorageError> {
        if !self.path.exists() {
            return Ok(LoadOutcome {
                tasks: Vec::new(),
                skipped: 0,
            });
        }

        let file = File::open(&self.path).map_err(|e| StorageError::new(&self.path, e))?;
        let reader = BufReader::new(file);

        let mut tasks = Vec::new();
        let mut skipped = 0;

        for (lineno, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| StorageError::new(&self.path, e))?;
            if line.trim().is_empty() {
                continue;
            }
            match Task::decode(&line) {
                Ok(task) => tasks.push(task),
                Err(e) => {
                    log::warn!(
                        "skipping corrupted task at {}:{}: {}",
                        self.path.display(),
                        lineno + 1,
                        e
                    );
                    skipped += 1;
                }
            }
        }

        Ok(LoadOutcome { tasks, skipped })
    }
}
