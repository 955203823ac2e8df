//! Logger configuration.
//!
//! The configuration is read once at startup (from a JSON file, with a small
//! set of environment overrides) and then handed to
//! [`QueryLogger::new`](crate::QueryLogger::new) by value. Nothing reads it
//! ambiently afterwards.

use crate::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use strum_macros::{Display, EnumString, VariantNames};

/// Environment variable overriding [`LoggerConfig::enabled`].
pub const ENV_ENABLED: &str = "DB_QUERY_LOGGER_ENABLED";
/// Environment variable overriding [`LoggerConfig::driver`].
pub const ENV_DRIVER: &str = "DB_QUERY_LOGGER_DRIVER";

/// Default disk name and root.
pub const DEFAULT_DISK: &str = "local";
pub const DEFAULT_DISK_ROOT: &str = "storage/logs";

/// Which pipeline writes records.
#[derive(
    Display, EnumString, VariantNames, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq,
    Default,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DriverKind {
    #[default]
    LogFile,
    JsonFile,
}

/// How deferred writes are executed.
#[derive(
    Display, EnumString, VariantNames, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq,
    Default,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum QueueConnection {
    /// Run the write on the caller's thread.
    Sync,
    /// Hand the write to background worker threads.
    #[default]
    Thread,
}

/// What the JSON driver does with an existing file that is not a JSON array.
#[derive(
    Display, EnumString, VariantNames, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq,
    Default,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CorruptPolicy {
    /// Return an error and leave the file alone.
    Fail,
    /// Move the file aside and start a new array.
    #[default]
    Backup,
    /// Overwrite the file with a new array. Prior content is lost.
    Discard,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct QueueConfig {
    pub connection: QueueConnection,
    /// Worker threads for the `thread` connection.
    pub workers: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            connection: QueueConnection::Thread,
            workers: 1,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LogFileConfig {
    pub file_name: String,
    pub path: String,
    pub message_formatter: String,
    /// Send lines to the `log` facade instead of a file.
    #[serde(alias = "use_laravel_logs")]
    pub use_host_logger: bool,
    pub disk: String,
}

impl Default for LogFileConfig {
    fn default() -> Self {
        Self {
            file_name: "date".to_string(),
            path: "default".to_string(),
            message_formatter: "log".to_string(),
            use_host_logger: false,
            disk: DEFAULT_DISK.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct JsonFileConfig {
    pub file_name: String,
    pub path: String,
    pub message_formatter: String,
    pub disk: String,
    pub on_corrupt: CorruptPolicy,
}

impl Default for JsonFileConfig {
    fn default() -> Self {
        Self {
            file_name: "date".to_string(),
            path: "default".to_string(),
            message_formatter: "json".to_string(),
            disk: DEFAULT_DISK.to_string(),
            on_corrupt: CorruptPolicy::Backup,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default, deny_unknown_fields)]
pub struct DriversConfig {
    pub log_file: LogFileConfig,
    pub json_file: JsonFileConfig,
}

/// Top-level configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    /// Gates every write.
    pub enabled: bool,
    pub driver: DriverKind,
    pub queue: QueueConfig,
    /// Disk name to root directory.
    pub disks: BTreeMap<String, PathBuf>,
    /// Extra fixed directory segments, selectable by name as a path generator.
    pub paths: BTreeMap<String, String>,
    /// Extra templates, selectable by name as a message formatter. Strings
    /// are line templates, objects are JSON schemas.
    pub formats: Map<String, Value>,
    pub drivers: DriversConfig,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        let mut disks = BTreeMap::new();
        disks.insert(DEFAULT_DISK.to_string(), PathBuf::from(DEFAULT_DISK_ROOT));
        Self {
            enabled: true,
            driver: DriverKind::default(),
            queue: QueueConfig::default(),
            disks,
            paths: BTreeMap::new(),
            formats: Map::new(),
            drivers: DriversConfig::default(),
        }
    }
}

impl LoggerConfig {
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| LoggerError::Config(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| LoggerError::io(path, e))?;
        Self::from_json_str(&content)
    }

    /// Read `path` (or start from defaults) and apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env()
    }

    /// Apply `DB_QUERY_LOGGER_ENABLED` / `DB_QUERY_LOGGER_DRIVER`.
    pub fn apply_env(self) -> Result<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_ENABLED) {
            self.enabled = parse_bool(&raw).ok_or_else(|| {
                LoggerError::Config(format!("{ENV_ENABLED} must be a boolean, found '{raw}'"))
            })?;
        }
        if let Some(raw) = lookup(ENV_DRIVER) {
            self.driver = raw.trim().parse().map_err(|_| {
                LoggerError::Config(format!("{ENV_DRIVER}: unknown driver '{raw}'"))
            })?;
        }
        Ok(self)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
