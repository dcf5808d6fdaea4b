//! MySQL dialect: `?` placeholders, backtick identifiers,
//! `ON DUPLICATE KEY UPDATE` upserts.

use super::{Dialect, Feature, JsonSyntax, LogicalType, UpsertSyntax};

#[derive(Debug, Clone, Copy, Default)]
pub struct MySql;

impl Dialect for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote_char(&self) -> char {
        '`'
    }

    fn write_placeholder(&self, _index: usize, out: &mut String) {
        out.push('?');
    }

    fn supports(&self, _feature: Feature) -> bool {
        false
    }

    /// The backtick is MySQL's identifier quote, so it is doubled in text
    /// values.
    fn escape_text(&self, text: &str) -> String {
        text.replace('`', "``")
    }

    fn type_name(&self, ty: LogicalType) -> &'static str {
        match ty {
            LogicalType::Varchar => "VARCHAR",
            LogicalType::Char => "CHAR",
            LogicalType::Text => "TEXT",
            LogicalType::SmallInt => "SMALLINT",
            LogicalType::Int => "INT",
            LogicalType::BigInt => "BIGINT",
            LogicalType::Float => "FLOAT",
            LogicalType::Double => "DOUBLE",
            LogicalType::Decimal => "DECIMAL",
            LogicalType::Boolean => "TINYINT(1)",
            LogicalType::Date => "DATE",
            LogicalType::Time => "TIME",
            LogicalType::Timestamp => "DATETIME",
            LogicalType::TimestampTz => "TIMESTAMP",
            LogicalType::Json => "JSON",
            LogicalType::Uuid => "CHAR(36)",
            LogicalType::Blob => "BLOB",
            LogicalType::Serial => "BIGINT AUTO_INCREMENT",
        }
    }

    fn upsert_syntax(&self) -> UpsertSyntax {
        UpsertSyntax::OnDuplicateKey
    }

    fn json_syntax(&self) -> JsonSyntax {
        JsonSyntax::Function
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_placeholders() {
        let mut out = String::new();
        MySql.write_placeholder(1, &mut out);
        MySql.write_placeholder(7, &mut out);
        assert_eq!(out, "??");
    }

    #[test]
    fn backtick_is_doubled() {
        assert_eq!(MySql.escape_text("a`b"), "a``b");
    }

    #[test]
    fn rejects_every_gated_feature() {
        for feature in [
            Feature::Pivot,
            Feature::Unpivot,
            Feature::Ordinality,
            Feature::ArraySlice,
        ] {
            assert!(!MySql.supports(feature));
        }
    }
}
