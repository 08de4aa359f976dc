//! User-facing error taxonomy for the command layer.

use crate::storage::StorageError;
use crate::task::ValidationError;
use std::fmt;

/// Everything that can go wrong handling one command. Each variant renders
/// to the message shown to the user; none of them terminates the session.
#[derive(Debug)]
pub enum CommandError {
    /// A create command with a blank description.
    EmptyDescription { kind: &'static str },
    /// A required clause (e.g. `/by <date>`) is absent or incomplete.
    MissingKeyword { what: &'static str },
    /// A numeric index outside `[1, size]`. `index` is the one-based number
    /// the user gave.
    InvalidIndex { index: i64 },
    /// A non-numeric argument where a number was required.
    NumberFormat { input: String },
    /// A date argument that does not parse under the expected pattern.
    DateFormat { input: String, expected: &'static str },
    /// Fields parsed but the task is semantically invalid.
    Validation(ValidationError),
    /// The first word is not a known command.
    UnknownCommand { word: String },
    /// Persisting the mutation failed.
    Storage(StorageError),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::EmptyDescription { kind } => {
                write!(f, "the description of a {} cannot be empty", kind)
            }
            CommandError::MissingKeyword { what } => {
                write!(f, "missing required part: {}", what)
            }
            CommandError::InvalidIndex { index } => {
                write!(f, "there is no task number {}", index)
            }
            CommandError::NumberFormat { input } => {
                write!(f, "'{}' is not a number", input)
            }
            CommandError::DateFormat { input, expected } => {
                write!(f, "'{}' is not a valid date, expected {}", input, expected)
            }
            CommandError::Validation(e) => write!(f, "{}", e),
            CommandError::UnknownCommand { word } => {
                write!(f, "I don't understand '{}'", word)
            }
            CommandError::Storage(e) => write!(f, "could not save your tasks: {}", e),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommandError::Validation(e) => Some(e),
            CommandError::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for CommandError {
    fn from(e: ValidationError) -> Self {
        CommandError::Validation(e)
    }
}

impl From<StorageError> for CommandError {
    fn from(e: StorageError) -> Self {
        CommandError::Storage(e)
    }
}
