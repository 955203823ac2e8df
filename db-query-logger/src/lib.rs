#![forbid(unsafe_code)]

//! Structured logging of executed database queries.
//!
//! The host reports each executed query as a [`QueryExecuted`] event. A
//! [`QueryListener`] turns it into a [`QueryRecord`] and defers the write
//! onto a [`TaskQueue`], where the configured [`Driver`] renders the record
//! and stores it as a text line or as an element of a JSON array file.

pub mod config;
pub mod driver;
pub mod error;
pub mod formatter;
pub mod generator;
pub mod listener;
mod logger;
pub mod queue;
pub mod record;
pub mod registry;
pub mod storage;

pub use crate::config::LoggerConfig;
pub use crate::driver::{Driver, QueryDriver};
pub use crate::error::{LoggerError, Result};
pub use crate::listener::{QueryExecuted, QueryListener};
pub use crate::logger::QueryLogger;
pub use crate::queue::TaskQueue;
pub use crate::record::{Binding, QueryRecord};
pub use crate::registry::Registry;

///
/// Everything needed to wire the logger into a host
///
/// ```
/// use db_query_logger::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{CorruptPolicy, DriverKind, LoggerConfig, QueueConnection};
    pub use crate::driver::{Driver, QueryDriver};
    pub use crate::error::LoggerError;
    pub use crate::listener::{QueryExecuted, QueryListener};
    pub use crate::record::{Binding, QueryRecord};
    pub use crate::registry::Registry;
    pub use crate::QueryLogger;
}
