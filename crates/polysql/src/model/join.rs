//! JOIN clause types.

use crate::error::{SqlError, SqlResult};
use crate::model::condition::WhereCondition;
use crate::qb::Select;
use serde::{Deserialize, Serialize};

/// Join flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl JoinType {
    pub fn as_sql(&self) -> &'static str {
        match self {
            JoinType::Inner => "INNER JOIN",
            JoinType::Left => "LEFT JOIN",
            JoinType::Right => "RIGHT JOIN",
            JoinType::Full => "FULL OUTER JOIN",
            JoinType::Cross => "CROSS JOIN",
        }
    }
}

/// A joinable relation: a named table or an aliased subquery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TableRef {
    Table(String),
    Subquery { query: Box<Select>, alias: String },
}

/// One JOIN clause.
///
/// ON conditions compare columns: the condition's `value` is rendered as a
/// sanitized identifier, not bound as a parameter. Raw ON conditions bind
/// their parameters as usual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinClause {
    pub join_type: JoinType,
    pub table: TableRef,
    pub on: Vec<WhereCondition>,
}

impl JoinClause {
    /// Create a join clause. Non-CROSS joins require at least one ON condition.
    pub fn new(join_type: JoinType, table: TableRef, on: Vec<WhereCondition>) -> SqlResult<Self> {
        if join_type != JoinType::Cross && on.is_empty() {
            return Err(SqlError::validation(format!(
                "{} requires at least one ON condition",
                join_type.as_sql()
            )));
        }
        Ok(Self {
            join_type,
            table,
            on,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::Op;
    use crate::value::Value;

    #[test]
    fn non_cross_join_requires_on() {
        let err =
            JoinClause::new(JoinType::Inner, TableRef::Table("orders".into()), vec![]).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn cross_join_takes_no_on() {
        let join = JoinClause::new(JoinType::Cross, TableRef::Table("tags".into()), vec![]);
        assert!(join.is_ok());
    }

    #[test]
    fn inner_join_with_on() {
        let on = WhereCondition::new("users.id", Op::Eq, Value::Text("orders.user_id".into()))
            .unwrap();
        let join = JoinClause::new(JoinType::Inner, TableRef::Table("orders".into()), vec![on]);
        assert!(join.is_ok());
    }
}
