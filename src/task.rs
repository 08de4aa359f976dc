//! Core task model: the four task variants and their encode/decode/display contracts.

use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

/// Storage pattern for date-times, e.g. "2019-12-02 1800".
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H%M";

/// Human-readable pattern for display output, e.g. "Dec 02 2019, 6:00 PM".
const DISPLAY_FORMAT: &str = "%b %d %Y, %-l:%M %p";

/// Field separator in the persisted line format.
const FIELD_SEP: &str = " | ";

/// A single trackable item: a description, a completion flag, and one of
/// four variant kinds carrying the variant-specific fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    description: String,
    done: bool,
    kind: Kind,
}

/// The task variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    /// A plain todo with no time attached.
    Todo,

    /// A task due by a specific date-time.
    Deadline { by: NaiveDateTime },

    /// A task spanning a start and end date-time.
    Event { start: NaiveDateTime, end: NaiveDateTime },

    /// A task needing a fixed number of hours, unscheduled.
    FixedDuration { hours: u32 },
}

impl Kind {
    /// Single-letter tag used in the persisted format and display brackets.
    pub fn tag(&self) -> char {
        match self {
            Kind::Todo => 'T',
            Kind::Deadline { .. } => 'D',
            Kind::Event { .. } => 'E',
            Kind::FixedDuration { .. } => 'F',
        }
    }
}

/// Validation errors for tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyDescription,
    NonPositiveDuration,
    EndBeforeStart,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyDescription => write!(f, "description cannot be empty"),
            ValidationError::NonPositiveDuration => {
                write!(f, "duration must be a positive number of hours")
            }
            ValidationError::EndBeforeStart => {
                write!(f, "an event cannot end before it starts")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors decoding a persisted task line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Wrong number of " | "-separated fields for the tag.
    FieldCount { found: usize },
    /// First field is not one of T/D/E/F.
    UnknownTag(String),
    /// Done flag is something other than "0" or "1".
    BadDoneFlag(String),
    /// A date-time field does not parse under the storage pattern.
    BadDate(String),
    /// A duration field is not a positive integer.
    BadDuration(String),
    /// Fields parsed but the task itself is invalid.
    Invalid(ValidationError),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::FieldCount { found } => {
                write!(f, "wrong field count: found {} field(s)", found)
            }
            DecodeError::UnknownTag(tag) => write!(f, "unknown task type '{}'", tag),
            DecodeError::BadDoneFlag(flag) => {
                write!(f, "done flag must be 0 or 1, found '{}'", flag)
            }
            DecodeError::BadDate(input) => {
                write!(f, "'{}' is not a date-time in yyyy-MM-dd HHmm format", input)
            }
            DecodeError::BadDuration(input) => {
                write!(f, "'{}' is not a positive number of hours", input)
            }
            DecodeError::Invalid(e) => write!(f, "invalid task: {}", e),
        }
    }
}

impl std::error::Error for DecodeError {}

impl From<ValidationError> for DecodeError {
    fn from(e: ValidationError) -> Self {
        DecodeError::Invalid(e)
    }
}

impl Task {
    /// Create a task, trimming and validating the description and the
    /// variant-specific fields.
    pub fn new(description: &str, kind: Kind) -> Result<Self, ValidationError> {
        let task = Self {
            description: description.trim().to_string(),
            done: false,
            kind,
        };
        task.validate()?;
        Ok(task)
    }

    /// Validate the task's fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        match &self.kind {
            Kind::FixedDuration { hours } if *hours == 0 => {
                Err(ValidationError::NonPositiveDuration)
            }
            Kind::Event { start, end } if end < start => Err(ValidationError::EndBeforeStart),
            _ => Ok(()),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// Set the completion flag. Setting an already-set flag is a no-op.
    pub fn set_done(&mut self, done: bool) {
        self.done = done;
    }

    /// Status icon shown in display output: "X" when done, a space otherwise.
    pub fn status_icon(&self) -> &'static str {
        if self.done { "X" } else { " " }
    }

    /// Whether the task falls on the given calendar date: a Deadline matches
    /// on its due date, an Event on its start date. Other variants never match.
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        match &self.kind {
            Kind::Deadline { by } => by.date() == date,
            Kind::Event { start, .. } => start.date() == date,
            Kind::Todo | Kind::FixedDuration { .. } => false,
        }
    }

    /// Encode the task as one line of the persisted format:
    /// `TYPE | 0/1 | description [| extra fields]`.
    pub fn encode(&self) -> String {
        let done = if self.done { "1" } else { "0" };
        let mut line = format!(
            "{}{sep}{}{sep}{}",
            self.kind.tag(),
            done,
            self.description,
            sep = FIELD_SEP
        );
        match &self.kind {
            Kind::Todo => {}
            Kind::Deadline { by } => {
                line.push_str(FIELD_SEP);
                line.push_str(&by.format(DATE_TIME_FORMAT).to_string());
            }
            Kind::Event { start, end } => {
                line.push_str(FIELD_SEP);
                line.push_str(&start.format(DATE_TIME_FORMAT).to_string());
                line.push_str(FIELD_SEP);
                line.push_str(&end.format(DATE_TIME_FORMAT).to_string());
            }
            Kind::FixedDuration { hours } => {
                line.push_str(FIELD_SEP);
                line.push_str(&hours.to_string());
            }
        }
        line
    }

    /// Decode one line of the persisted format. Exact inverse of [`encode`].
    ///
    /// [`encode`]: Task::encode
    pub fn decode(line: &str) -> Result<Self, DecodeError> {
        let parts: Vec<&str> = line.split(FIELD_SEP).collect();
        if parts.len() < 3 {
            return Err(DecodeError::FieldCount { found: parts.len() });
        }

        let done = match parts[1] {
            "0" => false,
            "1" => true,
            other => return Err(DecodeError::BadDoneFlag(other.to_string())),
        };
        let description = parts[2];

        let kind = match parts[0] {
            "T" => {
                expect_fields(&parts, 3)?;
                Kind::Todo
            }
            "D" => {
                expect_fields(&parts, 4)?;
                Kind::Deadline {
                    by: parse_date_time(parts[3])?,
                }
            }
            "E" => {
                expect_fields(&parts, 5)?;
                Kind::Event {
                    start: parse_date_time(parts[3])?,
                    end: parse_date_time(parts[4])?,
                }
            }
            "F" => {
                expect_fields(&parts, 4)?;
                Kind::FixedDuration {
                    hours: parse_hours(parts[3])?,
                }
            }
            other => return Err(DecodeError::UnknownTag(other.to_string())),
        };

        let mut task = Task::new(description, kind)?;
        task.set_done(done);
        Ok(task)
    }
}

fn expect_fields(parts: &[&str], expected: usize) -> Result<(), DecodeError> {
    if parts.len() != expected {
        return Err(DecodeError::FieldCount { found: parts.len() });
    }
    Ok(())
}

fn parse_date_time(input: &str) -> Result<NaiveDateTime, DecodeError> {
    NaiveDateTime::parse_from_str(input, DATE_TIME_FORMAT)
        .map_err(|_| DecodeError::BadDate(input.to_string()))
}

fn parse_hours(input: &str) -> Result<u32, DecodeError> {
    match input.parse::<i64>() {
        Ok(n) if n > 0 && n <= u32::MAX as i64 => Ok(n as u32),
        _ => Err(DecodeError::BadDuration(input.to_string())),
    }
}

fn human(dt: &NaiveDateTime) -> String {
    dt.format(DISPLAY_FORMAT).to_string()
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}][{}] {}",
            self.kind.tag(),
            self.status_icon(),
            self.description
        )?;
        match &self.kind {
            Kind::Todo => Ok(()),
            Kind::Deadline { by } => write!(f, " (by: {})", human(by)),
            Kind::Event { start, end } => {
                write!(f, " (from: {} to: {})", human(start), human(end))
            }
            Kind::FixedDuration { hours } => write!(f, " (Duration: {} hours)", hours),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, DATE_TIME_FORMAT).unwrap()
    }

    #[test]
    fn test_todo_display() {
        let task = Task::new("Buy milk", Kind::Todo).unwrap();
        assert_eq!(task.to_string(), "[T][ ] Buy milk");
    }

    #[test]
    fn test_deadline_display_when_done() {
        let mut task = Task::new(
            "Submit",
            Kind::Deadline {
                by: dt("2025-12-31 2359"),
            },
        )
        .unwrap();
        task.set_done(true);
        assert_eq!(task.to_string(), "[D][X] Submit (by: Dec 31 2025, 11:59 PM)");
    }

    #[test]
    fn test_event_encode() {
        let task = Task::new(
            "Meeting",
            Kind::Event {
                start: dt("2025-03-15 1400"),
                end: dt("2025-03-15 1600"),
            },
        )
        .unwrap();
        assert_eq!(task.encode(), "E | 0 | Meeting | 2025-03-15 1400 | 2025-03-15 1600");
    }

    #[test]
    fn test_fixed_duration_display() {
        let task = Task::new("Shower", Kind::FixedDuration { hours: 1 }).unwrap();
        assert_eq!(task.to_string(), "[F][ ] Shower (Duration: 1 hours)");
    }

    #[test]
    fn test_round_trip_all_variants() {
        let mut tasks = vec![
            Task::new("Buy milk", Kind::Todo).unwrap(),
            Task::new(
                "Submit report",
                Kind::Deadline {
                    by: dt("2019-12-02 1800"),
                },
            )
            .unwrap(),
            Task::new(
                "Team offsite",
                Kind::Event {
                    start: dt("2025-03-15 0900"),
                    end: dt("2025-03-16 1700"),
                },
            )
            .unwrap(),
            Task::new("Deep clean", Kind::FixedDuration { hours: 3 }).unwrap(),
        ];
        tasks[1].set_done(true);

        for task in &tasks {
            let decoded = Task::decode(&task.encode()).unwrap();
            assert_eq!(&decoded, task);
        }
    }

    #[test]
    fn test_decode_preserves_done_flag() {
        let task = Task::decode("T | 1 | Water plants").unwrap();
        assert!(task.is_done());
        assert_eq!(task.description(), "Water plants");
    }

    #[test]
    fn test_decode_too_few_fields() {
        assert_eq!(
            Task::decode("T | 1"),
            Err(DecodeError::FieldCount { found: 2 })
        );
    }

    #[test]
    fn test_decode_extra_fields_rejected() {
        assert_eq!(
            Task::decode("T | 0 | desc | extra"),
            Err(DecodeError::FieldCount { found: 4 })
        );
    }

    #[test]
    fn test_decode_unknown_tag() {
        assert_eq!(
            Task::decode("X | 0 | something"),
            Err(DecodeError::UnknownTag("X".to_string()))
        );
    }

    #[test]
    fn test_decode_bad_done_flag() {
        assert_eq!(
            Task::decode("T | yes | something"),
            Err(DecodeError::BadDoneFlag("yes".to_string()))
        );
    }

    #[test]
    fn test_decode_bad_date() {
        assert_eq!(
            Task::decode("D | 0 | Submit | tomorrow"),
            Err(DecodeError::BadDate("tomorrow".to_string()))
        );
    }

    #[test]
    fn test_decode_zero_duration() {
        assert_eq!(
            Task::decode("F | 0 | Nap | 0"),
            Err(DecodeError::BadDuration("0".to_string()))
        );
    }

    #[test]
    fn test_decode_event_end_before_start() {
        assert_eq!(
            Task::decode("E | 0 | Backwards | 2025-03-15 1600 | 2025-03-15 1400"),
            Err(DecodeError::Invalid(ValidationError::EndBeforeStart))
        );
    }

    #[test]
    fn test_new_rejects_empty_description() {
        assert_eq!(
            Task::new("   ", Kind::Todo),
            Err(ValidationError::EmptyDescription)
        );
    }

    #[test]
    fn test_new_trims_description() {
        let task = Task::new("  Buy milk  ", Kind::Todo).unwrap();
        assert_eq!(task.description(), "Buy milk");
    }

    #[test]
    fn test_occurs_on() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let deadline = Task::new(
            "Due",
            Kind::Deadline {
                by: dt("2025-03-15 2359"),
            },
        )
        .unwrap();
        let event = Task::new(
            "Spans midnight",
            Kind::Event {
                start: dt("2025-03-15 2300"),
                end: dt("2025-03-16 0100"),
            },
        )
        .unwrap();
        let todo = Task::new("Undated", Kind::Todo).unwrap();

        assert!(deadline.occurs_on(date));
        assert!(event.occurs_on(date));
        // Only the start date of an event is matched.
        assert!(!event.occurs_on(NaiveDate::from_ymd_opt(2025, 3, 16).unwrap()));
        assert!(!todo.occurs_on(date));
    }
}
