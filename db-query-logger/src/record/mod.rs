//! Captured query records.
//!
//! A [`QueryRecord`] is built once per executed query and consumed by a
//! driver. Only its rendered form is ever persisted.

mod binding;
mod raw_sql;

pub use binding::Binding;
pub use raw_sql::substitute_bindings;

/// One executed query, as captured from the host's database layer.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRecord {
    sql_template: String,
    bindings: Vec<Binding>,
    elapsed_ms: f64,
    connection_name: String,
    rendered_sql: String,
}

impl QueryRecord {
    /// Populate a record, deriving the rendered SQL immediately.
    pub fn new(
        sql_template: impl Into<String>,
        bindings: Vec<Binding>,
        elapsed_ms: f64,
        connection_name: impl Into<String>,
    ) -> Self {
        let sql_template = sql_template.into();
        let rendered_sql = substitute_bindings(&sql_template, &bindings);
        Self {
            sql_template,
            bindings,
            elapsed_ms,
            connection_name: connection_name.into(),
            rendered_sql,
        }
    }

    /// Raw query text with its placeholders.
    pub fn sql_template(&self) -> &str {
        &self.sql_template
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn connection_name(&self) -> &str {
        &self.connection_name
    }

    /// Query text with bindings substituted in. Display only.
    pub fn rendered_sql(&self) -> &str {
        &self.rendered_sql
    }
}
