/// Built-in log file name generators
use crate::generator::FileNameGenerator;
use chrono::{DateTime, Local};

/// One file per day: `2024-05-01`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DateFileName;

impl FileNameGenerator for DateFileName {
    fn file_name(&self, now: &DateTime<Local>) -> String {
        now.format("%Y-%m-%d").to_string()
    }
}

/// One file per second: `2024-05-01 13:45:10`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DatetimeFileName;

impl FileNameGenerator for DatetimeFileName {
    fn file_name(&self, now: &DateTime<Local>) -> String {
        now.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Unix seconds: `1714571110`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimestampFileName;

impl FileNameGenerator for TimestampFileName {
    fn file_name(&self, now: &DateTime<Local>) -> String {
        now.timestamp().to_string()
    }
}

/// A fresh random v4 uuid for every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidFileName;

impl FileNameGenerator for UuidFileName {
    fn file_name(&self, _now: &DateTime<Local>) -> String {
        uuid::Uuid::new_v4().hyphenated().to_string()
    }
}
