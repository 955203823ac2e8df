/// Plain text query log driver
use crate::config::DriverKind;
use crate::driver::{Collaborators, QueryDriver};
use crate::error::{LoggerError, Result};
use crate::formatter::{render_line, RecordFields, Template};
use crate::record::QueryRecord;
use crate::storage::Storage;
use chrono::{DateTime, Local};
use std::sync::Arc;

/// `log` target used when lines go to the host logger.
pub const HOST_LOG_TARGET: &str = "db_query_logger";

/// Where rendered lines end up.
pub enum LineSink {
    /// `log::debug!` on [`HOST_LOG_TARGET`].
    HostLogger,
    /// Appended to `{path}/{file_name}.log` on this disk.
    Disk(Arc<dyn Storage>),
}

/// Renders each record as one line of text.
pub struct LogFileDriver {
    enabled: bool,
    collaborators: Collaborators,
    sink: LineSink,
}

impl LogFileDriver {
    /// Fails if the formatter does not produce a line template.
    pub fn new(enabled: bool, collaborators: Collaborators, sink: LineSink) -> Result<Self> {
        let template = collaborators.formatter.format();
        if !matches!(template, Template::Line(_)) {
            return Err(LoggerError::InvalidTemplate(format!(
                "the log_file driver needs a line template, the formatter produced a {}",
                template.kind()
            )));
        }
        Ok(Self {
            enabled,
            collaborators,
            sink,
        })
    }

    fn render(&self, record: &QueryRecord, now: &DateTime<Local>) -> Result<String> {
        match self.collaborators.formatter.format() {
            Template::Line(line) => Ok(render_line(&line, &RecordFields::new(record, now))),
            Template::Schema(_) => Err(LoggerError::InvalidTemplate(
                "the log_file driver needs a line template".to_string(),
            )),
        }
    }
}

impl QueryDriver for LogFileDriver {
    fn kind(&self) -> DriverKind {
        DriverKind::LogFile
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn write_log(&self, record: &QueryRecord, now: &DateTime<Local>) -> Result<()> {
        let line = self.render(record, now)?;
        match &self.sink {
            LineSink::HostLogger => {
                log::debug!(target: HOST_LOG_TARGET, "{line}");
                Ok(())
            }
            LineSink::Disk(storage) => {
                let target = self.collaborators.destination(now, "log");
                storage.append(&target, &format!("{line}\n"))
            }
        }
    }
}
