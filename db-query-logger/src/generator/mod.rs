//! File name and directory generators.
//!
//! Both are resolved once from configuration and asked for a fresh value on
//! every write. Collisions are expected: date-based names deliberately group
//! a day's queries into one file.

mod file_name;
mod path;

pub use file_name::{DateFileName, DatetimeFileName, TimestampFileName, UuidFileName};
pub use path::{DefaultPath, FixedPath, DEFAULT_LOG_PATH};

use chrono::{DateTime, Local};

/// Produces the stem of a log file name (without extension).
pub trait FileNameGenerator: Send + Sync {
    /// `now` is the wall-clock reading taken for the record being written.
    fn file_name(&self, now: &DateTime<Local>) -> String;
}

/// Produces the directory, relative to the disk root, that holds log files.
pub trait PathGenerator: Send + Sync {
    fn path(&self) -> String;
}
