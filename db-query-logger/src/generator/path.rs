/// Built-in log directory generators
use crate::generator::PathGenerator;

/// Directory used when no other path is configured.
pub const DEFAULT_LOG_PATH: &str = "db-query-logger";

/// Always returns [`DEFAULT_LOG_PATH`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultPath;

impl PathGenerator for DefaultPath {
    fn path(&self) -> String {
        DEFAULT_LOG_PATH.to_string()
    }
}

/// A constant directory segment taken from configuration.
#[derive(Debug, Clone)]
pub struct FixedPath {
    segment: String,
}

impl FixedPath {
    pub fn new(segment: impl Into<String>) -> Self {
        Self {
            segment: segment.into(),
        }
    }
}

impl PathGenerator for FixedPath {
    fn path(&self) -> String {
        self.segment.clone()
    }
}
