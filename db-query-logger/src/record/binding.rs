/// Bound parameter values captured alongside a query
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single bound parameter value.
///
/// Serializes to the natural JSON scalar, so a binding list renders as
/// `[1,"abc",null,true]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Binding {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Binding {
    /// Render the value as an SQL literal for display.
    ///
    /// Text is single-quoted with `'` and `\` doubled; booleans render as
    /// `1`/`0`.
    pub fn to_sql_literal(&self) -> String {
        match self {
            Binding::Null => "null".to_string(),
            Binding::Bool(true) => "1".to_string(),
            Binding::Bool(false) => "0".to_string(),
            Binding::Int(i) => i.to_string(),
            Binding::Float(f) => f.to_string(),
            Binding::Text(s) => {
                let mut out = String::with_capacity(s.len() + 2);
                out.push('\'');
                for ch in s.chars() {
                    match ch {
                        '\'' => out.push_str("''"),
                        '\\' => out.push_str("\\\\"),
                        other => out.push(other),
                    }
                }
                out.push('\'');
                out
            }
        }
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql_literal())
    }
}

impl From<bool> for Binding {
    fn from(value: bool) -> Self {
        Binding::Bool(value)
    }
}

impl From<i32> for Binding {
    fn from(value: i32) -> Self {
        Binding::Int(i64::from(value))
    }
}

impl From<i64> for Binding {
    fn from(value: i64) -> Self {
        Binding::Int(value)
    }
}

impl From<f64> for Binding {
    fn from(value: f64) -> Self {
        Binding::Float(value)
    }
}

impl From<&str> for Binding {
    fn from(value: &str) -> Self {
        Binding::Text(value.to_string())
    }
}

impl From<String> for Binding {
    fn from(value: String) -> Self {
        Binding::Text(value)
    }
}

impl<T: Into<Binding>> From<Option<T>> for Binding {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Binding::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_literals() {
        assert_eq!(Binding::Null.to_sql_literal(), "null");
        assert_eq!(Binding::Bool(true).to_sql_literal(), "1");
        assert_eq!(Binding::Bool(false).to_sql_literal(), "0");
        assert_eq!(Binding::Int(-42).to_sql_literal(), "-42");
        assert_eq!(Binding::Float(1.5).to_sql_literal(), "1.5");
        assert_eq!(Binding::from("abc").to_sql_literal(), "'abc'");
    }

    #[test]
    fn test_text_literal_escapes_quotes_and_backslashes() {
        assert_eq!(Binding::from("O'Brien").to_sql_literal(), "'O''Brien'");
        assert_eq!(Binding::from(r"a\b").to_sql_literal(), r"'a\\b'");
    }

    #[test]
    fn test_serializes_as_plain_json_scalars() {
        let bindings = vec![
            Binding::Int(1),
            Binding::from("abc"),
            Binding::Null,
            Binding::Bool(true),
            Binding::Float(2.5),
        ];
        let json = serde_json::to_string(&bindings).unwrap();
        assert_eq!(json, r#"[1,"abc",null,true,2.5]"#);
    }

    #[test]
    fn test_deserializes_from_json_scalars() {
        let bindings: Vec<Binding> = serde_json::from_str(r#"[7, "x", null, false, 0.5]"#).unwrap();
        assert_eq!(
            bindings,
            vec![
                Binding::Int(7),
                Binding::from("x"),
                Binding::Null,
                Binding::Bool(false),
                Binding::Float(0.5),
            ]
        );
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Binding::from(None::<i64>), Binding::Null);
        assert_eq!(Binding::from(Some("v")), Binding::from("v"));
    }
}
