//! WHERE/HAVING condition primitives and CASE expressions.

use crate::error::{SqlError, SqlResult};
use crate::ident;
use crate::operator::Op;
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// Logical connective joining a condition to the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Logical {
    #[default]
    And,
    Or,
}

impl Logical {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Logical::And => "AND",
            Logical::Or => "OR",
        }
    }
}

/// A single WHERE/HAVING/ON condition.
///
/// For [`Op::Raw`], `column` holds the raw SQL fragment and `value` holds its
/// bound parameters as [`Value::Array`]; `?` markers in the fragment are
/// replaced with dialect placeholders at compile time. Raw fragments are the
/// one deliberate bypass of identifier sanitization: the caller is trusted
/// for that text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhereCondition {
    pub column: String,
    pub op: Op,
    pub value: Value,
    pub logical: Logical,
}

impl WhereCondition {
    /// Create a condition over a sanitized column identifier.
    pub fn new(column: &str, op: Op, value: Value) -> SqlResult<Self> {
        if op == Op::Raw {
            return Self::raw(column, match value {
                Value::Array(items) => items,
                Value::Null => Vec::new(),
                single => vec![single],
            });
        }
        ident::sanitize(column)?;
        Ok(Self {
            column: column.to_string(),
            op,
            value,
            logical: Logical::And,
        })
    }

    /// Create a raw-fragment condition with `?` placeholder markers.
    ///
    /// Empty or blank fragments are rejected.
    pub fn raw(sql: &str, params: Vec<Value>) -> SqlResult<Self> {
        if sql.trim().is_empty() {
            return Err(SqlError::validation("raw SQL fragment cannot be empty"));
        }
        Ok(Self {
            column: sql.to_string(),
            op: Op::Raw,
            value: Value::Array(params),
            logical: Logical::And,
        })
    }

    /// Set the connective to the previous condition.
    pub fn with_logical(mut self, logical: Logical) -> Self {
        self.logical = logical;
        self
    }
}

/// One `WHEN ... THEN ...` branch of a CASE expression.
///
/// The `when` text is a caller-trusted condition fragment (the comparison
/// operators it needs fall outside the identifier whitelist); the `then`
/// result is always parameter-bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseBranch {
    pub when: String,
    pub then: Value,
}

/// A searched CASE expression used as a select column.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CaseExpr {
    pub branches: Vec<CaseBranch>,
    pub alias: Option<String>,
}

impl CaseExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a branch. The condition must be non-empty.
    pub fn when(mut self, condition: &str, then: impl Into<Value>) -> SqlResult<Self> {
        if condition.trim().is_empty() {
            return Err(SqlError::validation("CASE branch condition cannot be empty"));
        }
        self.branches.push(CaseBranch {
            when: condition.to_string(),
            then: then.into(),
        });
        Ok(self)
    }

    /// Add an ELSE value, modeled as a terminal branch with condition `1=1`.
    pub fn otherwise(mut self, value: impl Into<Value>) -> Self {
        self.branches.push(CaseBranch {
            when: "1=1".to_string(),
            then: value.into(),
        });
        self
    }

    /// Set the output column alias.
    pub fn alias(mut self, alias: &str) -> SqlResult<Self> {
        ident::sanitize(alias)?;
        self.alias = Some(alias.to_string());
        Ok(self)
    }
}
