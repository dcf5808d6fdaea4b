//! DELETE query model and builder mixins.

use crate::dialect::{Compiler, Dialect, DialectKind};
use crate::error::SqlResult;
use crate::ident;
use crate::model::{Logical, WhereCondition};
use crate::operator::{IntoOp, Op};
use crate::value::{Statement, Value};
use serde::{Deserialize, Serialize};

/// A structured DELETE statement.
///
/// A DELETE without WHERE still compiles; refusing to run one is a
/// caller-level policy, not the compiler's.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Delete {
    pub(crate) from: Option<String>,
    pub(crate) wheres: Vec<WhereCondition>,
    pub(crate) returning: Vec<String>,
}

impl Delete {
    /// Create an empty DELETE; set the table with [`Delete::from`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target table.
    pub fn from(mut self, table: &str) -> SqlResult<Self> {
        ident::sanitize(table)?;
        self.from = Some(table.to_string());
        Ok(self)
    }

    /// Add a WHERE condition with an explicit operator (enum or checked
    /// string).
    pub fn where_op(
        mut self,
        column: &str,
        op: impl IntoOp,
        value: impl Into<Value>,
    ) -> SqlResult<Self> {
        self.wheres
            .push(WhereCondition::new(column, op.into_op()?, value.into())?);
        Ok(self)
    }

    /// Add an OR-connected WHERE condition.
    pub fn or_where_op(
        mut self,
        column: &str,
        op: impl IntoOp,
        value: impl Into<Value>,
    ) -> SqlResult<Self> {
        self.wheres.push(
            WhereCondition::new(column, op.into_op()?, value.into())?.with_logical(Logical::Or),
        );
        Ok(self)
    }

    /// Add WHERE: column = value
    pub fn eq(self, column: &str, value: impl Into<Value>) -> SqlResult<Self> {
        self.where_op(column, Op::Eq, value)
    }

    /// Add WHERE: column < value
    pub fn lt(self, column: &str, value: impl Into<Value>) -> SqlResult<Self> {
        self.where_op(column, Op::Lt, value)
    }

    /// Add WHERE: column IN (values...)
    pub fn in_list<T: Into<Value>>(self, column: &str, values: Vec<T>) -> SqlResult<Self> {
        self.where_op(
            column,
            Op::In,
            Value::Array(values.into_iter().map(Into::into).collect()),
        )
    }

    /// Add WHERE: column IS NULL
    pub fn is_null(mut self, column: &str) -> SqlResult<Self> {
        self.wheres
            .push(WhereCondition::new(column, Op::IsNull, Value::Null)?);
        Ok(self)
    }

    /// Add a raw WHERE fragment with `?` placeholder markers
    /// (caller-trusted text).
    pub fn where_raw(mut self, sql: &str, params: Vec<Value>) -> SqlResult<Self> {
        self.wheres.push(WhereCondition::raw(sql, params)?);
        Ok(self)
    }

    /// Add a complete condition value.
    pub fn where_cond(mut self, cond: WhereCondition) -> Self {
        self.wheres.push(cond);
        self
    }

    /// Set RETURNING columns.
    pub fn returning(mut self, columns: &[&str]) -> SqlResult<Self> {
        for col in columns {
            if *col != "*" {
                ident::sanitize(col)?;
            }
            self.returning.push((*col).to_string());
        }
        Ok(self)
    }

    /// Compile for the given dialect.
    pub fn compile(&self, dialect: DialectKind) -> SqlResult<Statement> {
        self.compile_with(dialect.dialect())
    }

    /// Compile with an explicit dialect implementation.
    pub fn compile_with(&self, dialect: &dyn Dialect) -> SqlResult<Statement> {
        let mut compiler = Compiler::new(dialect);
        compiler.delete(self)?;
        let statement = compiler.finish();
        tracing::debug!(
            dialect = dialect.name(),
            params = statement.params.len(),
            "compiled DELETE"
        );
        Ok(statement)
    }

    /// Render the SQL text only (for logging and tests).
    pub fn to_sql(&self, dialect: DialectKind) -> SqlResult<String> {
        Ok(self.compile(dialect)?.sql)
    }
}
