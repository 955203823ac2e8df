/// Placeholder tokens recognized in message templates
use strum_macros::{AsRefStr, EnumIter, EnumString, VariantNames};

/// A record field that can appear in a template as `:name:`.
#[derive(
    AsRefStr, EnumIter, EnumString, VariantNames, Debug, Clone, Copy, PartialEq, Eq, Hash,
)]
#[strum(serialize_all = "snake_case")]
pub enum Placeholder {
    Datetime,
    Query,
    Bindings,
    Time,
    Connection,
    Sql,
}

impl Placeholder {
    /// Token form, e.g. `:sql:`.
    pub fn token(&self) -> String {
        format!(":{}:", self.as_ref())
    }

    /// Parse a complete `:name:` token. Surrounding text is not allowed.
    pub fn from_token(token: &str) -> Option<Self> {
        let name = token.strip_prefix(':')?.strip_suffix(':')?;
        name.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::{IntoEnumIterator, VariantNames};

    #[test]
    fn test_tokens() {
        assert_eq!(Placeholder::Datetime.token(), ":datetime:");
        assert_eq!(Placeholder::Sql.token(), ":sql:");
    }

    #[test]
    fn test_from_token_round_trips_every_variant() {
        for placeholder in Placeholder::iter() {
            assert_eq!(Placeholder::from_token(&placeholder.token()), Some(placeholder));
        }
    }

    #[test]
    fn test_from_token_rejects_partial_or_unknown() {
        assert_eq!(Placeholder::from_token("sql"), None);
        assert_eq!(Placeholder::from_token(":sql"), None);
        assert_eq!(Placeholder::from_token(":sql: "), None);
        assert_eq!(Placeholder::from_token(":duration:"), None);
    }

    #[test]
    fn test_variant_names() {
        assert_eq!(
            Placeholder::VARIANTS,
            &["datetime", "query", "bindings", "time", "connection", "sql"]
        );
    }
}
