//! Command grammar: one raw input line in, a validated [`Command`] out.
//!
//! Dispatch is on the first whitespace-delimited word, case-insensitive.
//! Clause markers (` /by `, ` /from `, ` /to `, ` /duration `) are matched
//! with their surrounding spaces, so a description containing the bare words
//! "by", "from" or "to" is never mis-split.

use crate::error::CommandError;
use crate::task::{Kind, Task, DATE_TIME_FORMAT};
use chrono::{NaiveDate, NaiveDateTime};

/// Storage pattern for calendar dates in `list on`.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// One validated user instruction. Index-carrying variants hold the
/// zero-based internal index; the one-based user number has already been
/// mapped down (and rejected if below 1).
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Bye,
    List,
    ListOn(NaiveDate),
    Find(String),
    Mark(usize),
    Unmark(usize),
    Delete(usize),
    Add(Task),
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (word, args) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "bye" if args.trim().is_empty() => Ok(Command::Bye),
            "list" => parse_list(args.trim()),
            "find" => parse_find(args.trim()),
            "mark" => Ok(Command::Mark(parse_index(args.trim())?)),
            "unmark" => Ok(Command::Unmark(parse_index(args.trim())?)),
            "delete" => Ok(Command::Delete(parse_index(args.trim())?)),
            "todo" => parse_todo(args.trim()),
            "deadline" => parse_deadline(args),
            "event" => parse_event(args),
            "fixed_duration" => parse_fixed_duration(args),
            _ => Err(CommandError::UnknownCommand {
                word: word.to_string(),
            }),
        }
    }
}

/// Split `args` on a clause marker, trimming both halves. The leading space
/// consumed by the command-word split is reattached first, so a marker at
/// the very start of the arguments still matches.
fn split_on_marker(args: &str, marker: &str) -> Option<(String, String)> {
    let padded = format!(" {}", args);
    padded
        .split_once(marker)
        .map(|(left, right)| (left.trim().to_string(), right.trim().to_string()))
}

fn parse_date_time(input: &str) -> Result<NaiveDateTime, CommandError> {
    NaiveDateTime::parse_from_str(input, DATE_TIME_FORMAT).map_err(|_| CommandError::DateFormat {
        input: input.to_string(),
        expected: "yyyy-MM-dd HHmm (e.g. 2019-12-02 1800)",
    })
}

fn parse_index(arg: &str) -> Result<usize, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingKeyword {
            what: "a task number",
        });
    }
    let n: i64 = arg.parse().map_err(|_| CommandError::NumberFormat {
        input: arg.to_string(),
    })?;
    if n < 1 {
        return Err(CommandError::InvalidIndex { index: n });
    }
    Ok((n - 1) as usize)
}

fn parse_list(args: &str) -> Result<Command, CommandError> {
    if args.is_empty() {
        return Ok(Command::List);
    }
    if args.eq_ignore_ascii_case("on") {
        return Err(CommandError::MissingKeyword {
            what: "'list on <yyyy-MM-dd>'",
        });
    }
    let date_str = match args.split_once(char::is_whitespace) {
        Some((on, rest)) if on.eq_ignore_ascii_case("on") => rest.trim(),
        _ => {
            return Err(CommandError::UnknownCommand {
                word: "list".to_string(),
            });
        }
    };
    let date = NaiveDate::parse_from_str(date_str, DATE_FORMAT).map_err(|_| {
        CommandError::DateFormat {
            input: date_str.to_string(),
            expected: "yyyy-MM-dd (e.g. 2019-12-02)",
        }
    })?;
    Ok(Command::ListOn(date))
}

fn parse_find(args: &str) -> Result<Command, CommandError> {
    if args.is_empty() {
        return Err(CommandError::MissingKeyword {
            what: "a keyword to search for",
        });
    }
    Ok(Command::Find(args.to_string()))
}

fn parse_todo(args: &str) -> Result<Command, CommandError> {
    if args.is_empty() {
        return Err(CommandError::EmptyDescription { kind: "todo" });
    }
    let task = Task::new(args, Kind::Todo)?;
    Ok(Command::Add(task))
}

fn parse_deadline(args: &str) -> Result<Command, CommandError> {
    const WHAT: &str = "'/by <yyyy-MM-dd HHmm>'";
    let (description, by) = split_on_marker(args, " /by ")
        .ok_or(CommandError::MissingKeyword { what: WHAT })?;
    if by.is_empty() {
        return Err(CommandError::MissingKeyword { what: WHAT });
    }
    if description.is_empty() {
        return Err(CommandError::EmptyDescription { kind: "deadline" });
    }
    let by = parse_date_time(&by)?;
    let task = Task::new(&description, Kind::Deadline { by })?;
    Ok(Command::Add(task))
}

fn parse_event(args: &str) -> Result<Command, CommandError> {
    const WHAT: &str = "'/from <yyyy-MM-dd HHmm> /to <yyyy-MM-dd HHmm>'";
    let (description, times) = split_on_marker(args, " /from ")
        .ok_or(CommandError::MissingKeyword { what: WHAT })?;
    let (start, end) =
        split_on_marker(&times, " /to ").ok_or(CommandError::MissingKeyword { what: WHAT })?;
    if start.is_empty() || end.is_empty() {
        return Err(CommandError::MissingKeyword { what: WHAT });
    }
    if description.is_empty() {
        return Err(CommandError::EmptyDescription { kind: "event" });
    }
    let start = parse_date_time(&start)?;
    let end = parse_date_time(&end)?;
    let task = Task::new(&description, Kind::Event { start, end })?;
    Ok(Command::Add(task))
}

fn parse_fixed_duration(args: &str) -> Result<Command, CommandError> {
    const WHAT: &str = "'/duration <hours>'";
    let (description, duration) = split_on_marker(args, " /duration ")
        .ok_or(CommandError::MissingKeyword { what: WHAT })?;
    if duration.is_empty() {
        return Err(CommandError::MissingKeyword { what: WHAT });
    }
    if description.is_empty() {
        return Err(CommandError::EmptyDescription {
            kind: "fixed duration task",
        });
    }
    let hours: i64 = duration.parse().map_err(|_| CommandError::NumberFormat {
        input: duration.clone(),
    })?;
    if hours <= 0 {
        return Err(crate::task::ValidationError::NonPositiveDuration.into());
    }
    if hours > u32::MAX as i64 {
        return Err(CommandError::NumberFormat { input: duration });
    }
    let task = Task::new(&description, Kind::FixedDuration { hours: hours as u32 })?;
    Ok(Command::Add(task))
}
