//! PostgreSQL dialect: `$n` placeholders, double-quote identifiers, full
//! feature support.

use super::{Dialect, Feature, JsonSyntax, LogicalType, UpsertSyntax};

#[derive(Debug, Clone, Copy, Default)]
pub struct Postgres;

impl Dialect for Postgres {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn quote_char(&self) -> char {
        '"'
    }

    fn write_placeholder(&self, index: usize, out: &mut String) {
        out.push('$');
        out.push_str(&index.to_string());
    }

    fn supports(&self, _feature: Feature) -> bool {
        true
    }

    /// `$` also introduces dollar-quoted strings, so it is doubled in text
    /// values.
    fn escape_text(&self, text: &str) -> String {
        text.replace('$', "$$")
    }

    fn type_name(&self, ty: LogicalType) -> &'static str {
        match ty {
            LogicalType::Varchar => "VARCHAR",
            LogicalType::Char => "CHAR",
            LogicalType::Text => "TEXT",
            LogicalType::SmallInt => "SMALLINT",
            LogicalType::Int => "INTEGER",
            LogicalType::BigInt => "BIGINT",
            LogicalType::Float => "REAL",
            LogicalType::Double => "DOUBLE PRECISION",
            LogicalType::Decimal => "NUMERIC",
            LogicalType::Boolean => "BOOLEAN",
            LogicalType::Date => "DATE",
            LogicalType::Time => "TIME",
            LogicalType::Timestamp => "TIMESTAMP",
            LogicalType::TimestampTz => "TIMESTAMPTZ",
            LogicalType::Json => "JSONB",
            LogicalType::Uuid => "UUID",
            LogicalType::Blob => "BYTEA",
            LogicalType::Serial => "BIGSERIAL",
        }
    }

    fn upsert_syntax(&self) -> UpsertSyntax {
        UpsertSyntax::OnConflict
    }

    fn json_syntax(&self) -> JsonSyntax {
        JsonSyntax::Arrow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_placeholders() {
        let mut out = String::new();
        Postgres.write_placeholder(1, &mut out);
        Postgres.write_placeholder(12, &mut out);
        assert_eq!(out, "$1$12");
    }

    #[test]
    fn dollar_is_doubled() {
        assert_eq!(Postgres.escape_text("pay$day"), "pay$$day");
    }
}
