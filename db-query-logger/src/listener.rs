//! Entry point for the host's "query executed" notifications.

use crate::driver::{Driver, QueryDriver};
use crate::queue::TaskQueue;
use crate::record::{Binding, QueryRecord};
use std::sync::Arc;

/// What the host reports for every executed query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryExecuted {
    pub sql: String,
    pub bindings: Vec<Binding>,
    pub time_ms: f64,
    pub connection_name: String,
}

impl QueryExecuted {
    pub fn new(
        sql: impl Into<String>,
        bindings: Vec<Binding>,
        time_ms: f64,
        connection_name: impl Into<String>,
    ) -> Self {
        Self {
            sql: sql.into(),
            bindings,
            time_ms,
            connection_name: connection_name.into(),
        }
    }
}

/// Captures events and defers the write.
///
/// The record (including its rendered SQL) is built on the caller's thread;
/// only [`QueryDriver::persist`] runs on the queue. Write failures are logged
/// by the task and never reach the caller.
#[derive(Clone)]
pub struct QueryListener {
    driver: Arc<Driver>,
    queue: Arc<dyn TaskQueue>,
}

impl QueryListener {
    pub fn new(driver: Arc<Driver>, queue: Arc<dyn TaskQueue>) -> Self {
        Self { driver, queue }
    }

    pub fn handle(&self, event: QueryExecuted) {
        let record = QueryRecord::new(
            event.sql,
            event.bindings,
            event.time_ms,
            event.connection_name,
        );
        let driver = Arc::clone(&self.driver);

        self.queue.submit(Box::new(move || {
            if let Err(e) = driver.persist(&record) {
                log::error!(
                    "Failed to write query log entry for connection {}: {e}",
                    record.connection_name()
                );
            }
        }));
    }
}
