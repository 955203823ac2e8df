/// Rendering of a query record through a template
use crate::formatter::placeholder::Placeholder;
use crate::formatter::template::{Schema, SchemaNode};
use crate::record::QueryRecord;
use chrono::{DateTime, Local};
use serde_json::{Map, Value};
use strum::IntoEnumIterator;

/// Format of the `:datetime:` field.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The values a record contributes to a template, computed once per write.
#[derive(Debug, Clone)]
pub struct RecordFields<'a> {
    record: &'a QueryRecord,
    datetime: String,
}

impl<'a> RecordFields<'a> {
    pub fn new(record: &'a QueryRecord, now: &DateTime<Local>) -> Self {
        Self {
            record,
            datetime: now.format(DATETIME_FORMAT).to_string(),
        }
    }

    /// Typed value for JSON output.
    pub fn value(&self, placeholder: Placeholder) -> Value {
        match placeholder {
            Placeholder::Datetime => Value::String(self.datetime.clone()),
            Placeholder::Query => Value::String(self.record.sql_template().to_string()),
            Placeholder::Bindings => {
                serde_json::to_value(self.record.bindings()).unwrap_or(Value::Null)
            }
            Placeholder::Time => serde_json::Number::from_f64(self.record.elapsed_ms())
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Placeholder::Connection => Value::String(self.record.connection_name().to_string()),
            Placeholder::Sql => Value::String(self.record.rendered_sql().to_string()),
        }
    }

    /// Text form for line templates. Bindings become a compact JSON array.
    pub fn text(&self, placeholder: Placeholder) -> String {
        match placeholder {
            Placeholder::Datetime => self.datetime.clone(),
            Placeholder::Query => self.record.sql_template().to_string(),
            Placeholder::Bindings => {
                serde_json::to_string(self.record.bindings()).unwrap_or_else(|_| "[]".to_string())
            }
            Placeholder::Time => self.record.elapsed_ms().to_string(),
            Placeholder::Connection => self.record.connection_name().to_string(),
            Placeholder::Sql => self.record.rendered_sql().to_string(),
        }
    }
}

/// Replace every `:name:` token in `line` in a single pass.
///
/// Substituted text is never rescanned, so a query that itself contains
/// `:sql:` is written verbatim.
pub fn render_line(line: &str, fields: &RecordFields<'_>) -> String {
    let replacements: Vec<(String, String)> = Placeholder::iter()
        .map(|p| (p.token(), fields.text(p)))
        .collect();

    let mut out = String::with_capacity(line.len() * 2);
    let mut rest = line;
    'scan: while !rest.is_empty() {
        for (token, replacement) in &replacements {
            if let Some(after) = rest.strip_prefix(token.as_str()) {
                out.push_str(replacement);
                rest = after;
                continue 'scan;
            }
        }
        let mut chars = rest.chars();
        if let Some(ch) = chars.next() {
            out.push(ch);
        }
        rest = chars.as_str();
    }
    out
}

/// Build the JSON object for one record, mirroring the schema's shape.
pub fn render_schema(schema: &Schema, fields: &RecordFields<'_>) -> Value {
    let mut object = Map::new();
    for (key, node) in schema.entries() {
        let value = match node {
            SchemaNode::Field(placeholder) => fields.value(*placeholder),
            SchemaNode::Nested(inner) => render_schema(inner, fields),
        };
        object.insert(key.clone(), value);
    }
    Value::Object(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Binding;
    use chrono::TimeZone;
    use serde_json::json;

    fn record() -> QueryRecord {
        QueryRecord::new(
            "select * from users where id = ?",
            vec![Binding::Int(1)],
            1.25,
            "mysql",
        )
    }

    fn now() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
            .single()
            .unwrap()
    }

    #[test]
    fn test_render_line_places_raw_and_substituted_sql() {
        let record = record();
        let fields = RecordFields::new(&record, &now());
        let line = render_line("[:datetime:] - [query = :query:] - [sql = :sql:]", &fields);
        assert_eq!(
            line,
            "[2024-01-02 03:04:05] - [query = select * from users where id = ?] - [sql = select * from users where id = 1]"
        );
    }

    #[test]
    fn test_render_line_all_tokens() {
        let record = record();
        let fields = RecordFields::new(&record, &now());
        let line = render_line(":bindings: | :time: ms | :connection:", &fields);
        assert_eq!(line, "[1] | 1.25 ms | mysql");
    }

    #[test]
    fn test_render_line_does_not_rescan_substitutions() {
        let record = QueryRecord::new("select ':sql:'", vec![], 0.0, "pg");
        let fields = RecordFields::new(&record, &now());
        assert_eq!(render_line(":query:", &fields), "select ':sql:'");
    }

    #[test]
    fn test_render_line_keeps_unknown_tokens() {
        let record = record();
        let fields = RecordFields::new(&record, &now());
        assert_eq!(render_line(":user: ran :sql:", &fields).split(" ran ").next(), Some(":user:"));
    }

    #[test]
    fn test_whole_number_time_renders_without_fraction() {
        let record = QueryRecord::new("select 1", vec![], 12.0, "pg");
        let fields = RecordFields::new(&record, &now());
        assert_eq!(fields.text(Placeholder::Time), "12");
    }

    #[test]
    fn test_render_schema_renames_and_nests() {
        let record = record();
        let fields = RecordFields::new(&record, &now());
        let schema = Schema::new()
            .field("statement", Placeholder::Sql)
            .nested(
                "meta",
                Schema::new()
                    .field("ms", Placeholder::Time)
                    .field("params", Placeholder::Bindings),
            );

        let value = render_schema(&schema, &fields);
        assert_eq!(
            value,
            json!({
                "statement": "select * from users where id = 1",
                "meta": { "ms": 1.25, "params": [1] }
            })
        );
    }
}
