//! Error types for the timetable core.

use chrono::Weekday;
use thiserror::Error;

/// Errors that can occur in timetable operations.
#[derive(Error, Debug)]
pub enum TimetableError {
    #[error("Invalid course: {0}")]
    InvalidCourse(String),

    #[error("Course '{new}' overlaps '{existing}' on {day}")]
    Overlap {
        day: Weekday,
        new: String,
        existing: String,
    },

    #[error("No course at index {0}")]
    NotFound(usize),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Schedule file version {found} is newer than supported version {supported}")]
    UnknownVersion { found: u32, supported: u32 },

    #[error("Corrupt schedule file: {0}")]
    Corrupt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for timetable operations.
pub type TimetableResult<T> = Result<T, TimetableError>;
