//! Drivers render a [`QueryRecord`] and persist it.
//!
//! Two variants exist, selected by [`DriverKind`]:
//!
//! - [`LogFileDriver`] renders a line template and appends it to
//!   `{path}/{file_name}.log`, or hands it to the `log` facade.
//! - [`JsonFileDriver`] renders a schema and appends the object to the JSON
//!   array stored in `{path}/{file_name}.json`.
//!
//! Both ask their generators for a fresh file name, path and template on
//! every write. Nothing is cached across records.

mod json_file;
mod log_file;

pub use json_file::JsonFileDriver;
pub use log_file::{LineSink, LogFileDriver};

use crate::config::DriverKind;
use crate::error::Result;
use crate::formatter::MessageFormatter;
use crate::generator::{FileNameGenerator, PathGenerator};
use crate::record::QueryRecord;
use chrono::{DateTime, Local};
use enum_dispatch::enum_dispatch;

/// Behaviour shared by every driver.
#[enum_dispatch]
pub trait QueryDriver {
    fn kind(&self) -> DriverKind;

    /// The gate read from configuration.
    fn is_enabled(&self) -> bool;

    /// Render and store `record`. `now` is the single clock reading used for
    /// both the file name and the `:datetime:` field.
    fn write_log(&self, record: &QueryRecord, now: &DateTime<Local>) -> Result<()>;

    /// Write `record` if logging is enabled.
    ///
    /// A disabled driver performs no storage calls and returns `Ok(())`.
    fn persist(&self, record: &QueryRecord) -> Result<()> {
        if !self.is_enabled() {
            log::trace!("Query logging disabled, skipping entry");
            return Ok(());
        }
        self.write_log(record, &Local::now())
    }
}

/// The configured driver.
#[enum_dispatch(QueryDriver)]
pub enum Driver {
    LogFileDriver,
    JsonFileDriver,
}

/// Generators a driver asks for a destination and a template.
pub struct Collaborators {
    pub file_name: Box<dyn FileNameGenerator>,
    pub path: Box<dyn PathGenerator>,
    pub formatter: Box<dyn MessageFormatter>,
}

impl Collaborators {
    /// `{path}/{file_name}.{extension}`, or just the file when the path is
    /// empty.
    pub(crate) fn destination(&self, now: &DateTime<Local>, extension: &str) -> String {
        let file_name = self.file_name.file_name(now);
        let path = self.path.path();
        let path = path.trim_end_matches('/');
        if path.is_empty() {
            format!("{file_name}.{extension}")
        } else {
            format!("{path}/{file_name}.{extension}")
        }
    }
}
