//! Startup wiring: configuration in, listener out.

use crate::config::{DriverKind, LoggerConfig, QueueConfig, QueueConnection};
use crate::driver::{Collaborators, Driver, JsonFileDriver, LineSink, LogFileDriver};
use crate::error::{LoggerError, Result};
use crate::listener::{QueryExecuted, QueryListener};
use crate::queue::{SyncQueue, TaskQueue, ThreadQueue};
use crate::registry::Registry;
use crate::storage::{Disks, FileLocks, LocalDisk};
use std::sync::Arc;

/// A fully resolved query logger.
///
/// Everything the configuration names is looked up here, so unknown keys,
/// missing disks and mismatched templates are reported by
/// [`QueryLogger::new`] rather than by the first write.
///
/// # Example
///
/// ```no_run
/// use db_query_logger::{Binding, LoggerConfig, QueryExecuted, QueryLogger, Registry};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = LoggerConfig::load(None)?;
/// let logger = QueryLogger::new(config, &Registry::default())?;
///
/// let listener = logger.listener();
/// listener.handle(QueryExecuted::new(
///     "select * from users where id = ?",
///     vec![Binding::Int(1)],
///     0.84,
///     "mysql",
/// ));
///
/// logger.shutdown();
/// # Ok(())
/// # }
/// ```
pub struct QueryLogger {
    driver: Arc<Driver>,
    queue: Arc<dyn TaskQueue>,
    listener: QueryListener,
}

impl QueryLogger {
    /// Resolve `config` with local disks built from its `disks` table.
    pub fn new(config: LoggerConfig, registry: &Registry) -> Result<Self> {
        let mut disks = Disks::new();
        for (name, root) in &config.disks {
            disks.insert(name.clone(), Arc::new(LocalDisk::new(root.clone())));
        }
        Self::with_disks(config, registry, disks)
    }

    /// Resolve `config` against caller-supplied disks.
    pub fn with_disks(config: LoggerConfig, registry: &Registry, disks: Disks) -> Result<Self> {
        let mut registry = registry.clone();
        registry.extend_from_config(&config)?;

        let driver = Arc::new(build_driver(&config, &registry, &disks)?);
        let queue = build_queue(&config.queue)?;

        log::info!(
            "Query logging {} via {} driver on {} queue",
            if config.enabled { "enabled" } else { "disabled" },
            config.driver,
            config.queue.connection
        );

        let listener = QueryListener::new(Arc::clone(&driver), Arc::clone(&queue));
        Ok(Self {
            driver,
            queue,
            listener,
        })
    }

    /// A handle the host's event source can own.
    pub fn listener(&self) -> QueryListener {
        self.listener.clone()
    }

    /// Shorthand for `listener().handle(event)`.
    pub fn handle(&self, event: QueryExecuted) {
        self.listener.handle(event);
    }

    pub fn driver(&self) -> &Driver {
        &self.driver
    }

    /// Stop accepting events and wait for queued writes to finish.
    pub fn shutdown(&self) {
        self.queue.shutdown();
    }
}

impl Drop for QueryLogger {
    fn drop(&mut self) {
        self.queue.shutdown();
    }
}

fn build_driver(config: &LoggerConfig, registry: &Registry, disks: &Disks) -> Result<Driver> {
    match config.driver {
        DriverKind::LogFile => {
            let settings = &config.drivers.log_file;
            let collaborators = Collaborators {
                file_name: registry.file_name(&settings.file_name)?,
                path: registry.path(&settings.path)?,
                formatter: registry.formatter(&settings.message_formatter)?,
            };
            let sink = if settings.use_host_logger {
                LineSink::HostLogger
            } else {
                LineSink::Disk(disks.get(&settings.disk)?)
            };
            Ok(LogFileDriver::new(config.enabled, collaborators, sink)?.into())
        }
        DriverKind::JsonFile => {
            let settings = &config.drivers.json_file;
            let collaborators = Collaborators {
                file_name: registry.file_name(&settings.file_name)?,
                path: registry.path(&settings.path)?,
                formatter: registry.formatter(&settings.message_formatter)?,
            };
            let driver = JsonFileDriver::new(
                config.enabled,
                collaborators,
                disks.get(&settings.disk)?,
                settings.on_corrupt,
                FileLocks::shared(),
            )?;
            Ok(driver.into())
        }
    }
}

fn build_queue(config: &QueueConfig) -> Result<Arc<dyn TaskQueue>> {
    match config.connection {
        QueueConnection::Sync => Ok(Arc::new(SyncQueue)),
        QueueConnection::Thread => {
            if config.workers == 0 {
                return Err(LoggerError::Config(
                    "queue.workers must be at least 1".to_string(),
                ));
            }
            let queue = ThreadQueue::new(config.workers)
                .map_err(|e| LoggerError::Config(format!("failed to start workers: {e}")))?;
            Ok(Arc::new(queue))
        }
    }
}
