//! Message formatters.
//!
//! A formatter decides the shape of a log entry. Text drivers expect a
//! [`Template::Line`]; JSON drivers expect a [`Template::Schema`]. The
//! recognized placeholders are listed in [`Placeholder`].

mod placeholder;
mod render;
mod template;

pub use placeholder::Placeholder;
pub use render::{render_line, render_schema, RecordFields, DATETIME_FORMAT};
pub use template::{Schema, SchemaNode, Template};

/// Line template used by the `log` formatter.
pub const DEFAULT_LINE_TEMPLATE: &str = "[:datetime:] - [query = :query:] - [bindings = :bindings:] - [time = :time: ms] - [connection = :connection:] - [sql = :sql:]";

/// Produces the template a driver renders records through.
pub trait MessageFormatter: Send + Sync {
    fn format(&self) -> Template;
}

/// Single-line text entries.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMessageFormatter;

impl MessageFormatter for LogMessageFormatter {
    fn format(&self) -> Template {
        Template::Line(DEFAULT_LINE_TEMPLATE.to_string())
    }
}

/// One JSON object per record with every field under its own name.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonMessageFormatter;

impl MessageFormatter for JsonMessageFormatter {
    fn format(&self) -> Template {
        Template::Schema(
            Schema::new()
                .field("datetime", Placeholder::Datetime)
                .field("query", Placeholder::Query)
                .field("bindings", Placeholder::Bindings)
                .field("time", Placeholder::Time)
                .field("connection", Placeholder::Connection)
                .field("sql", Placeholder::Sql),
        )
    }
}

/// A template supplied by configuration.
#[derive(Debug, Clone)]
pub struct CustomFormatter {
    template: Template,
}

impl CustomFormatter {
    pub fn new(template: Template) -> Self {
        Self { template }
    }
}

impl MessageFormatter for CustomFormatter {
    fn format(&self) -> Template {
        self.template.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_formatter_mentions_every_placeholder() {
        let Template::Line(line) = LogMessageFormatter.format() else {
            panic!("expected a line template");
        };
        for token in [":datetime:", ":query:", ":bindings:", ":time:", ":connection:", ":sql:"] {
            assert!(line.contains(token), "missing {token}");
        }
    }

    #[test]
    fn test_json_formatter_key_order() {
        let Template::Schema(schema) = JsonMessageFormatter.format() else {
            panic!("expected a schema");
        };
        let keys: Vec<&str> = schema.entries().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            vec!["datetime", "query", "bindings", "time", "connection", "sql"]
        );
    }

    #[test]
    fn test_custom_formatter_returns_its_template() {
        let formatter = CustomFormatter::new(Template::Line(":sql:".to_string()));
        assert_eq!(formatter.format(), Template::Line(":sql:".to_string()));
    }
}
