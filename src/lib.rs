//! Taskbook: a personal task tracker with flat-file persistence.
//!
//! Short text commands create, complete, delete, search, and list tasks of
//! four kinds (todo, deadline, event, fixed-duration). State is persisted to
//! a pipe-delimited text file after every mutation, so the file always
//! mirrors the in-memory list.
//!
//! # Example
//!
//! ```no_run
//! use taskbook::{Interpreter, Response};
//!
//! let mut book = Interpreter::open("data/tasks.txt").unwrap();
//!
//! let added = book.handle("todo Buy milk");
//! println!("{}", added.text());
//!
//! let listed = book.handle("list");
//! println!("{}", listed.text());
//!
//! match book.handle("bye") {
//!     Response::Farewell(text) => println!("{}", text),
//!     Response::Message(text) => println!("{}", text),
//! }
//! ```

mod command;
mod error;
mod interpreter;
mod list;
mod storage;
mod task;

// Re-export public API
pub use command::Command;
pub use error::CommandError;
pub use interpreter::{Interpreter, Response};
pub use list::TaskList;
pub use storage::{LoadOutcome, Storage, StorageError};
pub use task::{DecodeError, Kind, Task, ValidationError, DATE_TIME_FORMAT};
