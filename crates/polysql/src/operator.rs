//! The fixed comparison-operator set for WHERE/HAVING conditions.

use crate::error::{SqlError, SqlResult};
use serde::{Deserialize, Serialize};

/// Comparison operator for building conditions.
///
/// The set is closed: a bare operator string is checked against it and
/// anything else is rejected. [`Op::Raw`] marks a caller-supplied SQL
/// fragment that bypasses identifier handling entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Op {
    /// Equal: column = value
    Eq,
    /// Not equal: column != value (also parses from `<>`)
    Ne,
    /// Greater than: column > value
    Gt,
    /// Greater than or equal: column >= value
    Gte,
    /// Less than: column < value
    Lt,
    /// Less than or equal: column <= value
    Lte,
    /// LIKE pattern match
    Like,
    /// NOT LIKE pattern match
    NotLike,
    /// Case-insensitive LIKE
    ILike,
    /// Case-insensitive NOT LIKE
    NotILike,
    /// IN (list)
    In,
    /// NOT IN (list)
    NotIn,
    /// BETWEEN a AND b
    Between,
    /// NOT BETWEEN a AND b
    NotBetween,
    /// IS NULL
    IsNull,
    /// IS NOT NULL
    IsNotNull,
    /// IS DISTINCT FROM value
    IsDistinctFrom,
    /// IS NOT DISTINCT FROM value
    IsNotDistinctFrom,
    /// Array/JSON containment: column @> value
    Contains,
    /// Array/JSON containment: column <@ value
    ContainedBy,
    /// JSON key existence: column ? value
    HasKey,
    /// Regular expression match: column ~ pattern
    Regexp,
    /// Negated regular expression match: column !~ pattern
    NotRegexp,
    /// Raw SQL fragment; the condition's column text is spliced verbatim
    Raw,
}

/// Every accepted operator spelling, in parse order.
const ACCEPTED: &[(&str, Op)] = &[
    ("=", Op::Eq),
    ("!=", Op::Ne),
    ("<>", Op::Ne),
    (">", Op::Gt),
    (">=", Op::Gte),
    ("<", Op::Lt),
    ("<=", Op::Lte),
    ("LIKE", Op::Like),
    ("NOT LIKE", Op::NotLike),
    ("ILIKE", Op::ILike),
    ("NOT ILIKE", Op::NotILike),
    ("IN", Op::In),
    ("NOT IN", Op::NotIn),
    ("BETWEEN", Op::Between),
    ("NOT BETWEEN", Op::NotBetween),
    ("IS NULL", Op::IsNull),
    ("IS NOT NULL", Op::IsNotNull),
    ("IS DISTINCT FROM", Op::IsDistinctFrom),
    ("IS NOT DISTINCT FROM", Op::IsNotDistinctFrom),
    ("@>", Op::Contains),
    ("<@", Op::ContainedBy),
    ("?", Op::HasKey),
    ("~", Op::Regexp),
    ("!~", Op::NotRegexp),
    ("RAW", Op::Raw),
];

impl Op {
    /// The SQL spelling of this operator.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Ne => "!=",
            Op::Gt => ">",
            Op::Gte => ">=",
            Op::Lt => "<",
            Op::Lte => "<=",
            Op::Like => "LIKE",
            Op::NotLike => "NOT LIKE",
            Op::ILike => "ILIKE",
            Op::NotILike => "NOT ILIKE",
            Op::In => "IN",
            Op::NotIn => "NOT IN",
            Op::Between => "BETWEEN",
            Op::NotBetween => "NOT BETWEEN",
            Op::IsNull => "IS NULL",
            Op::IsNotNull => "IS NOT NULL",
            Op::IsDistinctFrom => "IS DISTINCT FROM",
            Op::IsNotDistinctFrom => "IS NOT DISTINCT FROM",
            Op::Contains => "@>",
            Op::ContainedBy => "<@",
            Op::HasKey => "?",
            Op::Regexp => "~",
            Op::NotRegexp => "!~",
            Op::Raw => "RAW",
        }
    }

    /// Parse an operator token, case-insensitively with collapsed whitespace.
    ///
    /// Unknown tokens produce [`SqlError::Operator`] naming the token and
    /// listing every accepted spelling.
    pub fn parse(token: &str) -> SqlResult<Op> {
        let normalized = token
            .trim()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_uppercase();
        ACCEPTED
            .iter()
            .find(|(spelling, _)| *spelling == normalized)
            .map(|(_, op)| *op)
            .ok_or_else(|| SqlError::Operator {
                given: token.to_string(),
                accepted: ACCEPTED
                    .iter()
                    .map(|(spelling, _)| *spelling)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

}

/// Conversion into an [`Op`], for mixins that accept either the enum or a
/// bare operator string.
pub trait IntoOp {
    fn into_op(self) -> SqlResult<Op>;
}

impl IntoOp for Op {
    fn into_op(self) -> SqlResult<Op> {
        Ok(self)
    }
}

impl IntoOp for &str {
    fn into_op(self) -> SqlResult<Op> {
        Op::parse(self)
    }
}

impl IntoOp for String {
    fn into_op(self) -> SqlResult<Op> {
        Op::parse(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_accepted_spelling() {
        for (spelling, op) in ACCEPTED {
            assert_eq!(Op::parse(spelling).unwrap(), *op, "spelling {spelling}");
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Op::parse("like").unwrap(), Op::Like);
        assert_eq!(Op::parse("not   in").unwrap(), Op::NotIn);
        assert_eq!(Op::parse(" is null ").unwrap(), Op::IsNull);
    }

    #[test]
    fn angle_bracket_ne_aliases() {
        assert_eq!(Op::parse("<>").unwrap(), Op::Ne);
        assert_eq!(Op::Ne.as_sql(), "!=");
    }

    #[test]
    fn unknown_operator_is_rejected_with_listing() {
        let err = Op::parse("LIKE OR 1=1").unwrap_err();
        match err {
            SqlError::Operator { given, accepted } => {
                assert_eq!(given, "LIKE OR 1=1");
                assert!(accepted.contains("BETWEEN"));
                assert!(accepted.contains("IS NOT NULL"));
            }
            other => panic!("expected operator error, got {other:?}"),
        }
    }

    #[test]
    fn operator_set_has_twenty_four_members() {
        let mut ops: Vec<Op> = ACCEPTED.iter().map(|(_, op)| *op).collect();
        ops.sort_by_key(|op| op.as_sql());
        ops.dedup();
        assert_eq!(ops.len(), 24);
    }
}
