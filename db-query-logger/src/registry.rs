//! Component registry.
//!
//! Configuration selects generators and formatters by key. The registry maps
//! each key to a factory and is consulted once, when a
//! [`QueryLogger`](crate::QueryLogger) is built, so a misspelled key fails at
//! startup instead of on the first write.

use crate::config::LoggerConfig;
use crate::error::{LoggerError, Result};
use crate::formatter::{CustomFormatter, JsonMessageFormatter, LogMessageFormatter};
use crate::formatter::{MessageFormatter, Template};
use crate::generator::{DateFileName, DatetimeFileName, TimestampFileName, UuidFileName};
use crate::generator::{DefaultPath, FileNameGenerator, FixedPath, PathGenerator};
use std::collections::BTreeMap;
use std::sync::Arc;

type Factory<T> = Arc<dyn Fn() -> Box<T> + Send + Sync>;

/// Keyed factories for the three pluggable component kinds.
#[derive(Clone)]
pub struct Registry {
    file_names: BTreeMap<String, Factory<dyn FileNameGenerator>>,
    paths: BTreeMap<String, Factory<dyn PathGenerator>>,
    formatters: BTreeMap<String, Factory<dyn MessageFormatter>>,
}

impl Default for Registry {
    /// The built-in components:
    ///
    /// - file names: `date`, `datetime`, `timestamp`, `uuid`
    /// - paths: `default`
    /// - formatters: `log`, `json`
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register_file_name("date", || DateFileName);
        registry.register_file_name("datetime", || DatetimeFileName);
        registry.register_file_name("timestamp", || TimestampFileName);
        registry.register_file_name("uuid", || UuidFileName);
        registry.register_path("default", || DefaultPath);
        registry.register_formatter("log", || LogMessageFormatter);
        registry.register_formatter("json", || JsonMessageFormatter);
        registry
    }
}

impl Registry {
    /// A registry with nothing in it.
    pub fn empty() -> Self {
        Self {
            file_names: BTreeMap::new(),
            paths: BTreeMap::new(),
            formatters: BTreeMap::new(),
        }
    }

    pub fn register_file_name<F, G>(&mut self, key: impl Into<String>, factory: F)
    where
        F: Fn() -> G + Send + Sync + 'static,
        G: FileNameGenerator + 'static,
    {
        let factory: Factory<dyn FileNameGenerator> =
            Arc::new(move || -> Box<dyn FileNameGenerator> { Box::new(factory()) });
        self.file_names.insert(key.into(), factory);
    }

    pub fn register_path<F, G>(&mut self, key: impl Into<String>, factory: F)
    where
        F: Fn() -> G + Send + Sync + 'static,
        G: PathGenerator + 'static,
    {
        let factory: Factory<dyn PathGenerator> =
            Arc::new(move || -> Box<dyn PathGenerator> { Box::new(factory()) });
        self.paths.insert(key.into(), factory);
    }

    pub fn register_formatter<F, G>(&mut self, key: impl Into<String>, factory: F)
    where
        F: Fn() -> G + Send + Sync + 'static,
        G: MessageFormatter + 'static,
    {
        let factory: Factory<dyn MessageFormatter> =
            Arc::new(move || -> Box<dyn MessageFormatter> { Box::new(factory()) });
        self.formatters.insert(key.into(), factory);
    }

    /// Add the `paths` and `formats` tables of `config`.
    ///
    /// Format templates are parsed here, so an invalid schema is reported
    /// before anything is logged. Config entries replace registered ones
    /// with the same key.
    pub fn extend_from_config(&mut self, config: &LoggerConfig) -> Result<()> {
        for (key, segment) in &config.paths {
            let segment = segment.clone();
            self.register_path(key.clone(), move || FixedPath::new(segment.clone()));
        }
        for (key, value) in &config.formats {
            let template = Template::from_value(value).map_err(|e| match e {
                LoggerError::InvalidTemplate(msg) => {
                    LoggerError::InvalidTemplate(format!("format '{key}': {msg}"))
                }
                other => other,
            })?;
            self.register_formatter(key.clone(), move || CustomFormatter::new(template.clone()));
        }
        Ok(())
    }

    pub fn file_name(&self, key: &str) -> Result<Box<dyn FileNameGenerator>> {
        self.file_names
            .get(key)
            .map(|factory| factory())
            .ok_or_else(|| LoggerError::unknown("file name generator", key))
    }

    pub fn path(&self, key: &str) -> Result<Box<dyn PathGenerator>> {
        self.paths
            .get(key)
            .map(|factory| factory())
            .ok_or_else(|| LoggerError::unknown("path generator", key))
    }

    pub fn formatter(&self, key: &str) -> Result<Box<dyn MessageFormatter>> {
        self.formatters
            .get(key)
            .map(|factory| factory())
            .ok_or_else(|| LoggerError::unknown("message formatter", key))
    }

    pub fn file_name_keys(&self) -> Vec<&str> {
        self.file_names.keys().map(String::as_str).collect()
    }

    pub fn path_keys(&self) -> Vec<&str> {
        self.paths.keys().map(String::as_str).collect()
    }

    pub fn formatter_keys(&self) -> Vec<&str> {
        self.formatters.keys().map(String::as_str).collect()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("file_names", &self.file_name_keys())
            .field("paths", &self.path_keys())
            .field("formatters", &self.formatter_keys())
            .finish()
    }
}
