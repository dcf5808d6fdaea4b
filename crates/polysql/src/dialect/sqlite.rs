//! SQLite dialect: `?` placeholders, double-quote identifiers, `ON CONFLICT`
//! upserts.

use super::{Dialect, Feature, JsonSyntax, LogicalType, UpsertSyntax};

#[derive(Debug, Clone, Copy, Default)]
pub struct Sqlite;

impl Dialect for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn quote_char(&self) -> char {
        '"'
    }

    fn write_placeholder(&self, _index: usize, out: &mut String) {
        out.push('?');
    }

    fn supports(&self, _feature: Feature) -> bool {
        false
    }

    /// SQLite quotes identifiers with double quotes, so they are doubled in
    /// text values.
    fn escape_text(&self, text: &str) -> String {
        text.replace('"', "\"\"")
    }

    fn type_name(&self, ty: LogicalType) -> &'static str {
        match ty {
            LogicalType::Varchar
            | LogicalType::Char
            | LogicalType::Text
            | LogicalType::Date
            | LogicalType::Time
            | LogicalType::Timestamp
            | LogicalType::TimestampTz
            | LogicalType::Json
            | LogicalType::Uuid => "TEXT",
            LogicalType::SmallInt
            | LogicalType::Int
            | LogicalType::BigInt
            | LogicalType::Boolean
            | LogicalType::Serial => "INTEGER",
            LogicalType::Float | LogicalType::Double => "REAL",
            LogicalType::Decimal => "NUMERIC",
            LogicalType::Blob => "BLOB",
        }
    }

    fn upsert_syntax(&self) -> UpsertSyntax {
        UpsertSyntax::OnConflict
    }

    fn json_syntax(&self) -> JsonSyntax {
        JsonSyntax::Function
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affinity_collapses_to_storage_classes() {
        assert_eq!(Sqlite.type_name(LogicalType::Varchar), "TEXT");
        assert_eq!(Sqlite.type_name(LogicalType::BigInt), "INTEGER");
        assert_eq!(Sqlite.type_name(LogicalType::Double), "REAL");
    }

    #[test]
    fn double_quote_is_doubled() {
        assert_eq!(Sqlite.escape_text(r#"a"b"#), r#"a""b"#);
    }
}
