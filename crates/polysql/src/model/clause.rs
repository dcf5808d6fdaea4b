//! Ordering, CTE, set-operation, pivot, and select-column types.

use crate::error::{SqlError, SqlResult};
use crate::ident;
use crate::model::condition::CaseExpr;
use crate::qb::Select;
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// One ORDER BY term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderClause {
    pub column: String,
    pub direction: Direction,
}

/// A common table expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CteClause {
    pub name: String,
    pub query: Box<Select>,
    pub recursive: bool,
}

impl CteClause {
    pub fn new(name: &str, query: Select, recursive: bool) -> SqlResult<Self> {
        ident::sanitize(name)?;
        Ok(Self {
            name: name.to_string(),
            query: Box::new(query),
            recursive,
        })
    }
}

/// Set operation kind.
///
/// `Minus` is the Oracle spelling; none of the supported dialects speaks it,
/// so it compiles to `EXCEPT` everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetOpKind {
    Union,
    UnionAll,
    Intersect,
    Except,
    Minus,
}

impl SetOpKind {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SetOpKind::Union => "UNION",
            SetOpKind::UnionAll => "UNION ALL",
            SetOpKind::Intersect => "INTERSECT",
            SetOpKind::Except | SetOpKind::Minus => "EXCEPT",
        }
    }
}

/// A set operation appended to a SELECT. The operand query is non-null by
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetOperation {
    pub kind: SetOpKind,
    pub query: Box<Select>,
}

/// PIVOT specification: `PIVOT (AGG(...) FOR column IN (values...))`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotSpec {
    pub aggregate: String,
    pub for_column: String,
    pub in_values: Vec<Value>,
}

impl PivotSpec {
    pub fn new(aggregate: &str, for_column: &str, in_values: Vec<Value>) -> SqlResult<Self> {
        if aggregate.trim().is_empty() {
            return Err(SqlError::validation("PIVOT aggregate cannot be empty"));
        }
        ident::sanitize(aggregate)?;
        ident::sanitize(for_column)?;
        Ok(Self {
            aggregate: aggregate.to_string(),
            for_column: for_column.to_string(),
            in_values,
        })
    }
}

/// UNPIVOT specification: `UNPIVOT (value FOR name IN (columns...))`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnpivotSpec {
    pub value_column: String,
    pub name_column: String,
    pub in_columns: Vec<String>,
}

impl UnpivotSpec {
    pub fn new(value_column: &str, name_column: &str, in_columns: &[&str]) -> SqlResult<Self> {
        ident::sanitize(value_column)?;
        ident::sanitize(name_column)?;
        if in_columns.is_empty() {
            return Err(SqlError::validation(
                "UNPIVOT requires at least one source column",
            ));
        }
        let mut cols = Vec::with_capacity(in_columns.len());
        for col in in_columns {
            ident::sanitize(col)?;
            cols.push((*col).to_string());
        }
        Ok(Self {
            value_column: value_column.to_string(),
            name_column: name_column.to_string(),
            in_columns: cols,
        })
    }
}

/// WITH ORDINALITY marker, optionally aliased.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrdinalitySpec {
    pub alias: Option<String>,
}

/// One entry of the select list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectColumn {
    /// A sanitized column identifier or whitelisted expression, or `*`.
    Column(String),
    /// A searched CASE expression.
    Case(CaseExpr),
    /// COALESCE over one or more columns.
    Coalesce {
        columns: Vec<String>,
        alias: Option<String>,
    },
    /// NULLIF over exactly two columns.
    NullIf {
        first: String,
        second: String,
        alias: Option<String>,
    },
    /// JSON path extraction; the path is bound as a parameter.
    JsonExtract {
        column: String,
        path: String,
        alias: Option<String>,
    },
    /// Array slice with 1-based inclusive bounds. Bounds are accepted
    /// structurally; range semantics are the engine's concern.
    ArraySlice {
        column: String,
        from: i64,
        to: i64,
        alias: Option<String>,
    },
}
