/// Message templates: single-line text or nested JSON schema
use crate::error::{LoggerError, Result};
use crate::formatter::placeholder::Placeholder;
use serde_json::{Map, Value};

/// What a formatter hands to a driver.
#[derive(Debug, Clone, PartialEq)]
pub enum Template {
    /// Text containing `:name:` tokens.
    Line(String),
    /// Nested mapping whose leaves are placeholders.
    Schema(Schema),
}

impl Template {
    /// Build a template from a configuration value: strings become line
    /// templates, objects become schemas.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(line) => Ok(Template::Line(line.clone())),
            Value::Object(map) => Ok(Template::Schema(Schema::from_map(map)?)),
            other => Err(LoggerError::InvalidTemplate(format!(
                "expected a string or an object, found {other}"
            ))),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Template::Line(_) => "line",
            Template::Schema(_) => "schema",
        }
    }
}

/// Ordered JSON output shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    entries: Vec<(String, SchemaNode)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    Field(Placeholder),
    Nested(Schema),
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a leaf field.
    pub fn field(mut self, key: impl Into<String>, placeholder: Placeholder) -> Self {
        self.entries.push((key.into(), SchemaNode::Field(placeholder)));
        self
    }

    /// Append a nested object.
    pub fn nested(mut self, key: impl Into<String>, schema: Schema) -> Self {
        self.entries.push((key.into(), SchemaNode::Nested(schema)));
        self
    }

    pub fn entries(&self) -> &[(String, SchemaNode)] {
        &self.entries
    }

    /// Parse a schema, rejecting leaves that are not exactly one placeholder.
    pub fn from_map(map: &Map<String, Value>) -> Result<Self> {
        let mut schema = Schema::new();
        for (key, value) in map {
            match value {
                Value::Object(inner) => {
                    schema = schema.nested(key.clone(), Schema::from_map(inner)?);
                }
                Value::String(token) => {
                    let placeholder = Placeholder::from_token(token).ok_or_else(|| {
                        LoggerError::InvalidTemplate(format!(
                            "schema key '{key}' must map to a placeholder, found '{token}'"
                        ))
                    })?;
                    schema = schema.field(key.clone(), placeholder);
                }
                other => {
                    return Err(LoggerError::InvalidTemplate(format!(
                        "schema key '{key}' must map to a placeholder or an object, found {other}"
                    )));
                }
            }
        }
        Ok(schema)
    }
}
