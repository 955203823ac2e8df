/// Binding substitution for display-only SQL
use crate::record::binding::Binding;

/// Substitute `bindings` into the `?` placeholders of `sql`.
///
/// Placeholders inside single-quoted literals are left alone. The escape
/// sequences `\'`, `''` and `??` are copied through untouched. Once the
/// bindings run out, remaining `?` placeholders are kept as-is.
pub fn substitute_bindings(sql: &str, bindings: &[Binding]) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut remaining = bindings.iter();
    let mut in_literal = false;
    let mut chars = sql.chars().peekable();

    while let Some(ch) = chars.next() {
        let next = chars.peek().copied();
        match (ch, next) {
            ('\\', Some('\'')) | ('\'', Some('\'')) | ('?', Some('?')) => {
                out.push(ch);
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            ('\'', _) => {
                in_literal = !in_literal;
                out.push(ch);
            }
            ('?', _) if !in_literal => match remaining.next() {
                Some(binding) => out.push_str(&binding.to_sql_literal()),
                None => out.push('?'),
            },
            _ => out.push(ch),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitutes_in_order() {
        let sql = substitute_bindings(
            "select * from users where id = ? and name = ?",
            &[Binding::Int(1), Binding::from("bob")],
        );
        assert_eq!(sql, "select * from users where id = 1 and name = 'bob'");
    }

    #[test]
    fn test_leaves_placeholders_inside_literals() {
        let sql = substitute_bindings("select '?' as q, ? as v", &[Binding::Int(5)]);
        assert_eq!(sql, "select '?' as q, 5 as v");
    }

    #[test]
    fn test_escaped_quote_does_not_toggle_literal() {
        let sql = substitute_bindings("select 'it''s ?', ?", &[Binding::Int(3)]);
        assert_eq!(sql, "select 'it''s ?', 3");

        let sql = substitute_bindings(r"select 'it\'s ?', ?", &[Binding::Int(3)]);
        assert_eq!(sql, r"select 'it\'s ?', 3");
    }

    #[test]
    fn test_double_question_mark_is_operator() {
        let sql = substitute_bindings("select data ??| array[?]", &[Binding::from("a")]);
        assert_eq!(sql, "select data ??| array['a']");
    }

    #[test]
    fn test_missing_bindings_keep_placeholder() {
        let sql = substitute_bindings("insert into t values (?, ?)", &[Binding::Null]);
        assert_eq!(sql, "insert into t values (null, ?)");
    }

    #[test]
    fn test_extra_bindings_are_ignored() {
        let sql = substitute_bindings("select 1", &[Binding::Int(9)]);
        assert_eq!(sql, "select 1");
    }

    #[test]
    fn test_no_placeholders_remain_when_bindings_cover_them() {
        let templates = [
            "select * from a where x = ? and y in (?, ?)",
            "update t set v = ? where k = ?",
            "select ? , '?' , ?",
        ];
        for template in templates {
            let count = template.matches('?').count();
            let bindings: Vec<Binding> = (0..count as i64).map(Binding::Int).collect();
            let rendered = substitute_bindings(template, &bindings);
            let outside_literals: String = rendered.split('\'').step_by(2).collect();
            assert!(
                !outside_literals.contains('?'),
                "placeholder left in {rendered}"
            );
        }
    }

    #[test]
    fn test_unicode_text_is_preserved() {
        let sql = substitute_bindings("select ? -- ünïcødé", &[Binding::from("日本")]);
        assert_eq!(sql, "select '日本' -- ünïcødé");
    }
}
