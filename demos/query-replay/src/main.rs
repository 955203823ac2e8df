mod cli;

use clap::Parser;
use db_query_logger::prelude::*;
use log::{info, warn};
use std::fs::File;
use std::io::{self, BufRead, BufReader};

/// Parse one replay line. Blank lines and `#` comments yield `None`.
///
/// The bindings and timing columns are optional; missing ones mean no
/// bindings and zero milliseconds.
fn parse_line(line: &str, connection: &str) -> Result<Option<QueryExecuted>, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() || line.trim_start().starts_with('#') {
        return Ok(None);
    }

    let mut columns = line.splitn(3, '\t');
    let sql = columns.next().unwrap_or_default();

    let bindings: Vec<Binding> = match columns.next().map(str::trim) {
        None | Some("") => Vec::new(),
        Some(raw) => serde_json::from_str(raw).map_err(|e| format!("invalid bindings: {e}"))?,
    };

    let time_ms = match columns.next().map(str::trim) {
        None | Some("") => 0.0,
        Some(raw) => raw
            .parse::<f64>()
            .map_err(|e| format!("invalid time '{raw}': {e}"))?,
    };

    Ok(Some(QueryExecuted::new(sql, bindings, time_ms, connection)))
}

fn replay(reader: impl BufRead, logger: &QueryLogger, connection: &str) -> io::Result<usize> {
    let listener = logger.listener();
    let mut count = 0;
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        match parse_line(&line, connection) {
            Ok(Some(event)) => {
                listener.handle(event);
                count += 1;
            }
            Ok(None) => {}
            Err(e) => warn!("Skipping line {}: {e}", index + 1),
        }
    }
    Ok(count)
}

fn main() {
    env_logger::init();
    let args = cli::Args::parse();

    let config = LoggerConfig::load(args.config()).unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {e}");
        std::process::exit(1);
    });

    let logger = QueryLogger::new(config, &Registry::default()).unwrap_or_else(|e| {
        eprintln!("Failed to create query logger: {e}");
        std::process::exit(1);
    });

    let result = match args.input() {
        Some(path) => {
            if args.verbose {
                info!("Replaying queries from {}", path.display());
            }
            File::open(path)
                .and_then(|file| replay(BufReader::new(file), &logger, &args.connection))
        }
        None => replay(io::stdin().lock(), &logger, &args.connection),
    };

    logger.shutdown();

    match result {
        Ok(count) => println!("Replayed {count} queries"),
        Err(e) => {
            eprintln!("Failed to read input: {e}");
            std::process::exit(1);
        }
    }
}
