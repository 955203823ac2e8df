//! Configuration file loading and startup validation.

#![allow(clippy::expect_used)] // Integration tests can panic on setup failures

use db_query_logger::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_reads_file() {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"{{ "driver": "json_file", "drivers": {{ "json_file": {{ "on_corrupt": "fail" }} }} }}"#
    )
    .expect("write config");

    let config = LoggerConfig::from_file(file.path()).expect("config loads");
    assert_eq!(config.driver, DriverKind::JsonFile);
    assert_eq!(config.drivers.json_file.on_corrupt, CorruptPolicy::Fail);
}

#[test]
fn test_invalid_json_is_config_error() {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, "{{ driver: json_file }}").expect("write config");

    let err = LoggerConfig::from_file(file.path()).err();
    assert!(matches!(err, Some(LoggerError::Config(_))));
}

#[test]
fn test_unknown_formatter_is_rejected_at_startup() {
    let config = LoggerConfig::from_json_str(
        r#"{ "queue": { "connection": "sync" },
             "drivers": { "log_file": { "message_formatter": "yaml", "use_host_logger": true } } }"#,
    )
    .expect("config parses");

    let err = QueryLogger::new(config, &Registry::default()).err();
    assert!(matches!(
        err,
        Some(LoggerError::UnknownComponent {
            kind: "message formatter",
            ..
        })
    ));
}

#[test]
fn test_invalid_custom_schema_is_rejected_at_startup() {
    let config = LoggerConfig::from_json_str(
        r#"{ "formats": { "broken": { "sql": ":sql:", "ms": 5 } } }"#,
    )
    .expect("config parses");

    let err = QueryLogger::new(config, &Registry::default()).err();
    assert!(matches!(err, Some(LoggerError::InvalidTemplate(_))));
}
