//! Value sanitation and LIKE-pattern escaping.
//!
//! Parameter binding is the primary injection defense; the rewriting here is
//! a defense-in-depth belt applied to every value before it enters the
//! parameter list. Dialect-specific substitutions (PostgreSQL `$`, MySQL
//! backtick, SQLite double quote) are applied afterwards by the compiler via
//! [`crate::dialect::Dialect::escape_text`].

use crate::value::Value;

/// Sanitize a bound value.
///
/// Numbers, booleans, and NULL pass through unchanged. Timestamps and dates
/// become ISO-8601 text, UUIDs their hyphenated text form, JSON documents
/// their serialized text, and arrays are sanitized element-wise. Text has
/// backslashes doubled, quotes doubled, and C0 control characters stripped.
pub fn sanitize_value(value: Value) -> Value {
    match value {
        Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) => value,
        Value::Text(s) => Value::Text(sanitize_text(&s)),
        Value::Timestamp(ts) => Value::Text(ts.to_rfc3339()),
        Value::Date(d) => Value::Text(d.format("%Y-%m-%d").to_string()),
        Value::Uuid(u) => Value::Text(u.to_string()),
        Value::Array(items) => Value::Array(items.into_iter().map(sanitize_value).collect()),
        Value::Json(doc) => Value::Text(sanitize_text(&doc.to_string())),
    }
}

/// Escape text content: double backslashes and quotes, strip control bytes.
pub fn sanitize_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("''"),
            '"' => out.push_str("\"\""),
            c if (c as u32) < 0x20 || c == '\u{7F}' => {}
            c => out.push(c),
        }
    }
    out
}

/// Escape a literal string for use inside a LIKE pattern.
///
/// Only the wildcard characters `%`, `_`, and the escape character `\` are
/// touched; use this when a caller value must match literally.
pub fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '%' => out.push_str("\\%"),
            '_' => out.push_str("\\_"),
            '\\' => out.push_str("\\\\"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn safe_text_is_unchanged() {
        assert_eq!(sanitize_text("hello world"), "hello world");
        assert_eq!(
            sanitize_value(Value::Text("plain".into())),
            Value::Text("plain".into())
        );
    }

    #[test]
    fn single_quotes_are_doubled() {
        assert_eq!(sanitize_text("it's a test"), "it''s a test");
    }

    #[test]
    fn backslashes_are_doubled() {
        assert_eq!(sanitize_text(r"path\to\file"), r"path\\to\\file");
    }

    #[test]
    fn double_quotes_are_doubled() {
        assert_eq!(sanitize_text(r#"say "hi""#), r#"say ""hi"""#);
    }

    #[test]
    fn control_characters_are_stripped() {
        assert_eq!(sanitize_text("a\0b\x01c\x7Fd"), "abcd");
        assert_eq!(sanitize_text("line1\nline2"), "line1line2");
    }

    #[test]
    fn numbers_and_booleans_pass_through() {
        assert_eq!(sanitize_value(Value::Int(42)), Value::Int(42));
        assert_eq!(sanitize_value(Value::Float(1.5)), Value::Float(1.5));
        assert_eq!(sanitize_value(Value::Bool(true)), Value::Bool(true));
        assert_eq!(sanitize_value(Value::Null), Value::Null);
    }

    #[test]
    fn timestamps_become_iso8601_text() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        match sanitize_value(Value::Timestamp(ts)) {
            Value::Text(s) => assert!(s.starts_with("2024-03-01T12:30:00")),
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn arrays_are_sanitized_recursively() {
        let v = Value::Array(vec![Value::Text("a'b".into()), Value::Int(1)]);
        assert_eq!(
            sanitize_value(v),
            Value::Array(vec![Value::Text("a''b".into()), Value::Int(1)])
        );
    }

    #[test]
    fn json_documents_become_text() {
        let doc = serde_json::json!({"k": 1});
        match sanitize_value(Value::Json(doc)) {
            // JSON text contains double quotes, which the text pass doubles.
            Value::Text(s) => assert_eq!(s, r#"{""k"":1}"#),
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn like_escaping_touches_wildcards_only() {
        assert_eq!(escape_like("50%_off"), r"50\%\_off");
        assert_eq!(escape_like(r"a\b"), r"a\\b");
        assert_eq!(escape_like("plain"), "plain");
    }
}
