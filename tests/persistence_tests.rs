//! Integration tests for the persistence round-trip: file format, corrupted
//! line recovery, and state surviving across sessions.

mod common;

use common::TestEnv;
use taskbook::{Interpreter, Storage, Task};
use tempfile::TempDir;

#[test]
fn test_file_mirrors_every_mutation() {
    let mut env = TestEnv::new();

    env.eval("todo Buy milk").unwrap();
    assert_eq!(env.file_contents(), "T | 0 | Buy milk\n");

    env.eval("mark 1").unwrap();
    assert_eq!(env.file_contents(), "T | 1 | Buy milk\n");

    env.eval("unmark 1").unwrap();
    assert_eq!(env.file_contents(), "T | 0 | Buy milk\n");

    env.eval("delete 1").unwrap();
    assert_eq!(env.file_contents(), "");
}

#[test]
fn test_all_variants_round_trip_through_the_file() {
    let mut env = TestEnv::new();

    env.eval("todo Buy milk").unwrap();
    env.eval("deadline Submit /by 2025-12-31 2359").unwrap();
    env.eval("event Meeting /from 2025-03-15 1400 /to 2025-03-15 1600")
        .unwrap();
    env.eval("fixed_duration Deep clean /duration 3").unwrap();
    env.eval("mark 2").unwrap();

    let before: Vec<Task> = env.interpreter.tasks().all().to_vec();
    env.reopen();
    let after: Vec<Task> = env.interpreter.tasks().all().to_vec();

    assert_eq!(before, after);
}

#[test]
fn test_corrupted_line_is_skipped_and_counted() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("tasks.txt");
    std::fs::write(&path, "T | 0 | Buy milk\nD | 0\n").unwrap();

    let interpreter = Interpreter::open(&path).unwrap();
    assert_eq!(interpreter.tasks().len(), 1);
    assert_eq!(interpreter.skipped_on_load(), 1);
    assert_eq!(interpreter.tasks().all()[0].description(), "Buy milk");
}

#[test]
fn test_mixed_corruption_kinds_are_all_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("tasks.txt");
    std::fs::write(
        &path,
        "T | 0 | Good one\n\
         Z | 0 | Unknown tag\n\
         T | maybe | Bad flag\n\
         D | 0 | Bad date | not-a-date\n\
         F | 0 | Bad hours | -2\n\
         E | 0 | Good event | 2025-03-15 1400 | 2025-03-15 1600\n",
    )
    .unwrap();

    let interpreter = Interpreter::open(&path).unwrap();
    assert_eq!(interpreter.tasks().len(), 2);
    assert_eq!(interpreter.skipped_on_load(), 4);
}

#[test]
fn test_missing_file_starts_empty() {
    let temp_dir = TempDir::new().unwrap();
    let interpreter = Interpreter::open(temp_dir.path().join("does-not-exist.txt")).unwrap();

    assert_eq!(interpreter.tasks().len(), 0);
    assert_eq!(interpreter.skipped_on_load(), 0);
}

#[test]
fn test_save_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("deeply").join("nested").join("tasks.txt");

    let mut interpreter = Interpreter::open(&path).unwrap();
    interpreter.eval("todo Buy milk").unwrap();

    assert!(path.exists());
}

#[test]
fn test_corrupted_lines_dropped_on_next_save() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("tasks.txt");
    std::fs::write(&path, "garbage\nT | 0 | Survivor\n").unwrap();

    let mut interpreter = Interpreter::open(&path).unwrap();
    assert_eq!(interpreter.skipped_on_load(), 1);

    // The next mutation rewrites the file from the in-memory list, so the
    // corrupted line is gone for good.
    interpreter.eval("todo Fresh").unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "T | 0 | Survivor\nT | 0 | Fresh\n");
}

#[test]
fn test_storage_load_outcome_direct() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("tasks.txt");
    std::fs::write(&path, "T | 1 | Done already\n").unwrap();

    let outcome = Storage::new(&path).load().unwrap();
    assert_eq!(outcome.tasks.len(), 1);
    assert!(outcome.tasks[0].is_done());
    assert_eq!(outcome.skipped, 0);
}
