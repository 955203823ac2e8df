/// JSON array query log driver
use crate::config::{CorruptPolicy, DriverKind};
use crate::driver::{Collaborators, QueryDriver};
use crate::error::{LoggerError, Result};
use crate::formatter::{render_schema, RecordFields, Template};
use crate::record::QueryRecord;
use crate::storage::{FileLocks, Storage};
use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

/// Appends one object per record to a pretty-printed JSON array.
///
/// Each write reads the whole file, decodes it, appends and rewrites it, so
/// cost grows with file size. The cycle runs under a lock keyed by the
/// storage's [`lock_key`](Storage::lock_key) for the file, so drivers in
/// this process that share a [`FileLocks`] never lose each other's entries,
/// even when they reach the file through different disks. Writers in other
/// processes are not coordinated.
pub struct JsonFileDriver {
    enabled: bool,
    collaborators: Collaborators,
    storage: Arc<dyn Storage>,
    on_corrupt: CorruptPolicy,
    locks: Arc<FileLocks>,
}

impl JsonFileDriver {
    /// Fails if the formatter does not produce a schema.
    pub fn new(
        enabled: bool,
        collaborators: Collaborators,
        storage: Arc<dyn Storage>,
        on_corrupt: CorruptPolicy,
        locks: Arc<FileLocks>,
    ) -> Result<Self> {
        let template = collaborators.formatter.format();
        if !matches!(template, Template::Schema(_)) {
            return Err(LoggerError::InvalidTemplate(format!(
                "the json_file driver needs a schema, the formatter produced a {}",
                template.kind()
            )));
        }
        Ok(Self {
            enabled,
            collaborators,
            storage,
            on_corrupt,
            locks,
        })
    }

    fn render(&self, record: &QueryRecord, now: &DateTime<Local>) -> Result<Value> {
        match self.collaborators.formatter.format() {
            Template::Schema(schema) => Ok(render_schema(&schema, &RecordFields::new(record, now))),
            Template::Line(_) => Err(LoggerError::InvalidTemplate(
                "the json_file driver needs a schema".to_string(),
            )),
        }
    }

    fn append_entry(&self, target: &str, entry: Value, now: &DateTime<Local>) -> Result<()> {
        let mut entries = if self.storage.exists(target)? {
            let content = self.storage.get(target)?;
            match decode_entries(&content) {
                Ok(entries) => entries,
                Err(reason) => self.recover(target, reason, now)?,
            }
        } else {
            Vec::new()
        };

        entries.push(entry);
        self.storage.put(target, &encode_pretty(&entries)?)
    }

    /// Apply the corrupt-file policy. Returns the entries to start from.
    fn recover(&self, target: &str, reason: String, now: &DateTime<Local>) -> Result<Vec<Value>> {
        match self.on_corrupt {
            CorruptPolicy::Fail => Err(LoggerError::CorruptLog {
                path: PathBuf::from(target),
                reason,
            }),
            CorruptPolicy::Backup => {
                let backup = self.backup_name(target, now)?;
                self.storage.rename(target, &backup)?;
                log::warn!("Corrupt query log {target} ({reason}), moved to {backup}");
                Ok(Vec::new())
            }
            CorruptPolicy::Discard => {
                log::warn!("Corrupt query log {target} ({reason}), discarding previous entries");
                Ok(Vec::new())
            }
        }
    }

    fn backup_name(&self, target: &str, now: &DateTime<Local>) -> Result<String> {
        let base = format!("{target}.corrupt-{}", now.timestamp());
        let mut candidate = base.clone();
        let mut n = 1;
        while self.storage.exists(&candidate)? {
            candidate = format!("{base}-{n}");
            n += 1;
        }
        Ok(candidate)
    }
}

impl QueryDriver for JsonFileDriver {
    fn kind(&self) -> DriverKind {
        DriverKind::JsonFile
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn write_log(&self, record: &QueryRecord, now: &DateTime<Local>) -> Result<()> {
        let entry = self.render(record, now)?;
        let target = self.collaborators.destination(now, "json");
        let key = self.storage.lock_key(&target)?;
        self.locks
            .with_lock(&key, || self.append_entry(&target, entry, now))
    }
}

/// Decode an existing log. Blank files count as an empty array.
fn decode_entries(content: &str) -> std::result::Result<Vec<Value>, String> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    match serde_json::from_str::<Value>(content) {
        Ok(Value::Array(entries)) => Ok(entries),
        Ok(other) => Err(format!("expected a JSON array, found {}", json_type(&other))),
        Err(e) => Err(e.to_string()),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Four-space indentation, matching the files this log format has always
/// produced.
fn encode_pretty(entries: &[Value]) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    entries.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
