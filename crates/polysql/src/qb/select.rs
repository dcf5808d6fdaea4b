//! SELECT query model and builder mixins.

use crate::dialect::{Compiler, Dialect, DialectKind};
use crate::error::{SqlError, SqlResult};
use crate::ident;
use crate::model::{
    CaseExpr, CteClause, Direction, JoinClause, JoinType, Logical, OrderClause, OrdinalitySpec,
    PivotSpec, SelectColumn, SetOpKind, SetOperation, TableRef, UnpivotSpec, WhereCondition,
    WindowFunction, WindowSpec,
};
use crate::operator::{IntoOp, Op};
use crate::value::{Statement, Value};
use serde::{Deserialize, Serialize};

/// A structured SELECT statement.
///
/// Built through consuming mixin calls and handed whole to a dialect
/// compiler; compilation never mutates the model, so the same value can be
/// recompiled under different dialects.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Select {
    pub(crate) columns: Vec<SelectColumn>,
    pub(crate) windows: Vec<WindowFunction>,
    pub(crate) distinct: bool,
    pub(crate) from: Option<TableRef>,
    pub(crate) joins: Vec<JoinClause>,
    pub(crate) ctes: Vec<CteClause>,
    pub(crate) wheres: Vec<WhereCondition>,
    pub(crate) group_by: Vec<String>,
    pub(crate) having: Vec<WhereCondition>,
    pub(crate) order_by: Vec<OrderClause>,
    pub(crate) limit: Option<i64>,
    pub(crate) offset: Option<i64>,
    pub(crate) pivot: Option<PivotSpec>,
    pub(crate) unpivot: Option<UnpivotSpec>,
    pub(crate) ordinality: Option<OrdinalitySpec>,
    pub(crate) set_ops: Vec<SetOperation>,
}

impl Select {
    /// Create a SELECT over the given columns. An empty list selects `*`.
    pub fn new(columns: &[&str]) -> SqlResult<Self> {
        let mut select = Self::default();
        for col in columns {
            select = select.column(col)?;
        }
        Ok(select)
    }

    /// Create a `SELECT *`.
    pub fn all() -> Self {
        Self::default()
    }

    // ==================== SELECT list ====================

    /// Append one select column (identifier or whitelisted expression).
    pub fn column(mut self, column: &str) -> SqlResult<Self> {
        if column != "*" {
            ident::sanitize(column)?;
        }
        self.columns.push(SelectColumn::Column(column.to_string()));
        Ok(self)
    }

    /// Request DISTINCT rows.
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Append a CASE expression column. Requires at least one branch.
    pub fn select_case(mut self, case: CaseExpr) -> SqlResult<Self> {
        if case.branches.is_empty() {
            return Err(SqlError::validation(
                "CASE expression requires at least one branch",
            ));
        }
        self.columns.push(SelectColumn::Case(case));
        Ok(self)
    }

    /// Append `COALESCE(columns...)`. Requires at least one column.
    pub fn coalesce(mut self, columns: &[&str], alias: Option<&str>) -> SqlResult<Self> {
        if columns.is_empty() {
            return Err(SqlError::validation(
                "COALESCE requires at least one column",
            ));
        }
        let mut cols = Vec::with_capacity(columns.len());
        for col in columns {
            ident::sanitize(col)?;
            cols.push((*col).to_string());
        }
        self.columns.push(SelectColumn::Coalesce {
            columns: cols,
            alias: sanitize_alias(alias)?,
        });
        Ok(self)
    }

    /// Append `NULLIF(first, second)`. Requires exactly two columns.
    pub fn null_if(mut self, first: &str, second: &str, alias: Option<&str>) -> SqlResult<Self> {
        if first.trim().is_empty() || second.trim().is_empty() {
            return Err(SqlError::validation("NULLIF requires exactly two columns"));
        }
        ident::sanitize(first)?;
        ident::sanitize(second)?;
        self.columns.push(SelectColumn::NullIf {
            first: first.to_string(),
            second: second.to_string(),
            alias: sanitize_alias(alias)?,
        });
        Ok(self)
    }

    /// Append a JSON path extraction; the path is bound as a parameter.
    pub fn json_extract(mut self, column: &str, path: &str, alias: Option<&str>) -> SqlResult<Self> {
        ident::sanitize(column)?;
        self.columns.push(SelectColumn::JsonExtract {
            column: column.to_string(),
            path: path.to_string(),
            alias: sanitize_alias(alias)?,
        });
        Ok(self)
    }

    /// Append an array slice with 1-based inclusive bounds.
    ///
    /// Bounds are accepted structurally, including negative or out-of-range
    /// values.
    pub fn array_slice(
        mut self,
        column: &str,
        from: i64,
        to: i64,
        alias: Option<&str>,
    ) -> SqlResult<Self> {
        ident::sanitize(column)?;
        self.columns.push(SelectColumn::ArraySlice {
            column: column.to_string(),
            from,
            to,
            alias: sanitize_alias(alias)?,
        });
        Ok(self)
    }

    // ==================== FROM & JOIN ====================

    /// Set the FROM table.
    pub fn from(mut self, table: &str) -> SqlResult<Self> {
        ident::sanitize(table)?;
        self.from = Some(TableRef::Table(table.to_string()));
        Ok(self)
    }

    /// Set an aliased subquery as the FROM relation.
    pub fn from_subquery(mut self, query: Select, alias: &str) -> SqlResult<Self> {
        ident::sanitize(alias)?;
        self.from = Some(TableRef::Subquery {
            query: Box::new(query),
            alias: alias.to_string(),
        });
        Ok(self)
    }

    fn join(mut self, join_type: JoinType, table: &str, left: &str, right: &str) -> SqlResult<Self> {
        ident::sanitize(table)?;
        let on = WhereCondition::new(left, Op::Eq, Value::Text(right.to_string()))?;
        ident::sanitize(right)?;
        self.joins.push(JoinClause::new(
            join_type,
            TableRef::Table(table.to_string()),
            vec![on],
        )?);
        Ok(self)
    }

    /// Add `INNER JOIN table ON left = right`.
    pub fn inner_join(self, table: &str, left: &str, right: &str) -> SqlResult<Self> {
        self.join(JoinType::Inner, table, left, right)
    }

    /// Add `LEFT JOIN table ON left = right`.
    pub fn left_join(self, table: &str, left: &str, right: &str) -> SqlResult<Self> {
        self.join(JoinType::Left, table, left, right)
    }

    /// Add `RIGHT JOIN table ON left = right`.
    pub fn right_join(self, table: &str, left: &str, right: &str) -> SqlResult<Self> {
        self.join(JoinType::Right, table, left, right)
    }

    /// Add `FULL OUTER JOIN table ON left = right`.
    pub fn full_join(self, table: &str, left: &str, right: &str) -> SqlResult<Self> {
        self.join(JoinType::Full, table, left, right)
    }

    /// Add `CROSS JOIN table`.
    pub fn cross_join(mut self, table: &str) -> SqlResult<Self> {
        ident::sanitize(table)?;
        self.joins.push(JoinClause::new(
            JoinType::Cross,
            TableRef::Table(table.to_string()),
            vec![],
        )?);
        Ok(self)
    }

    /// Add a fully specified join clause.
    pub fn join_clause(mut self, join: JoinClause) -> Self {
        self.joins.push(join);
        self
    }

    // ==================== CTEs ====================

    /// Add a CTE: `WITH name AS (query)`.
    pub fn with(mut self, name: &str, query: Select) -> SqlResult<Self> {
        self.ctes.push(CteClause::new(name, query, false)?);
        Ok(self)
    }

    /// Add a recursive CTE. One recursive CTE promotes the whole WITH list
    /// to `WITH RECURSIVE`.
    pub fn with_recursive(mut self, name: &str, query: Select) -> SqlResult<Self> {
        self.ctes.push(CteClause::new(name, query, true)?);
        Ok(self)
    }

    // ==================== WHERE ====================

    /// Add a WHERE condition with an explicit operator.
    ///
    /// The operator may be the [`Op`] enum or a bare string checked against
    /// the fixed operator set.
    pub fn where_op(
        mut self,
        column: &str,
        op: impl IntoOp,
        value: impl Into<Value>,
    ) -> SqlResult<Self> {
        let cond = WhereCondition::new(column, op.into_op()?, value.into())?;
        self.wheres.push(cond);
        Ok(self)
    }

    /// Add an OR-connected WHERE condition with an explicit operator.
    pub fn or_where_op(
        mut self,
        column: &str,
        op: impl IntoOp,
        value: impl Into<Value>,
    ) -> SqlResult<Self> {
        let cond =
            WhereCondition::new(column, op.into_op()?, value.into())?.with_logical(Logical::Or);
        self.wheres.push(cond);
        Ok(self)
    }

    /// Add a complete condition value.
    pub fn where_cond(mut self, cond: WhereCondition) -> Self {
        self.wheres.push(cond);
        self
    }

    /// Add WHERE: column = value
    pub fn eq(self, column: &str, value: impl Into<Value>) -> SqlResult<Self> {
        self.where_op(column, Op::Eq, value)
    }

    /// Add WHERE: column != value
    pub fn ne(self, column: &str, value: impl Into<Value>) -> SqlResult<Self> {
        self.where_op(column, Op::Ne, value)
    }

    /// Add WHERE: column > value
    pub fn gt(self, column: &str, value: impl Into<Value>) -> SqlResult<Self> {
        self.where_op(column, Op::Gt, value)
    }

    /// Add WHERE: column >= value
    pub fn gte(self, column: &str, value: impl Into<Value>) -> SqlResult<Self> {
        self.where_op(column, Op::Gte, value)
    }

    /// Add WHERE: column < value
    pub fn lt(self, column: &str, value: impl Into<Value>) -> SqlResult<Self> {
        self.where_op(column, Op::Lt, value)
    }

    /// Add WHERE: column <= value
    pub fn lte(self, column: &str, value: impl Into<Value>) -> SqlResult<Self> {
        self.where_op(column, Op::Lte, value)
    }

    /// Add WHERE: column LIKE pattern
    pub fn like(self, column: &str, pattern: impl Into<Value>) -> SqlResult<Self> {
        self.where_op(column, Op::Like, pattern)
    }

    /// Add WHERE: column ILIKE pattern
    pub fn ilike(self, column: &str, pattern: impl Into<Value>) -> SqlResult<Self> {
        self.where_op(column, Op::ILike, pattern)
    }

    /// Add WHERE: column IS NULL
    pub fn is_null(mut self, column: &str) -> SqlResult<Self> {
        self.wheres
            .push(WhereCondition::new(column, Op::IsNull, Value::Null)?);
        Ok(self)
    }

    /// Add WHERE: column IS NOT NULL
    pub fn is_not_null(mut self, column: &str) -> SqlResult<Self> {
        self.wheres
            .push(WhereCondition::new(column, Op::IsNotNull, Value::Null)?);
        Ok(self)
    }

    /// Add WHERE: column IN (values...)
    pub fn in_list<T: Into<Value>>(self, column: &str, values: Vec<T>) -> SqlResult<Self> {
        self.where_op(column, Op::In, Value::Array(values.into_iter().map(Into::into).collect()))
    }

    /// Add WHERE: column NOT IN (values...)
    pub fn not_in<T: Into<Value>>(self, column: &str, values: Vec<T>) -> SqlResult<Self> {
        self.where_op(
            column,
            Op::NotIn,
            Value::Array(values.into_iter().map(Into::into).collect()),
        )
    }

    /// Add WHERE: column BETWEEN from AND to
    pub fn between(
        self,
        column: &str,
        from: impl Into<Value>,
        to: impl Into<Value>,
    ) -> SqlResult<Self> {
        self.where_op(
            column,
            Op::Between,
            Value::Array(vec![from.into(), to.into()]),
        )
    }

    /// Add a raw WHERE fragment with `?` placeholder markers.
    ///
    /// The fragment bypasses identifier sanitization entirely; never pass
    /// untrusted text here.
    pub fn where_raw(mut self, sql: &str, params: Vec<Value>) -> SqlResult<Self> {
        self.wheres.push(WhereCondition::raw(sql, params)?);
        Ok(self)
    }

    /// Alias of [`Select::where_raw`] with the AND connective made explicit.
    pub fn and_where_raw(self, sql: &str, params: Vec<Value>) -> SqlResult<Self> {
        self.where_raw(sql, params)
    }

    /// Add an OR-connected raw WHERE fragment.
    pub fn or_where_raw(mut self, sql: &str, params: Vec<Value>) -> SqlResult<Self> {
        self.wheres
            .push(WhereCondition::raw(sql, params)?.with_logical(Logical::Or));
        Ok(self)
    }

    // ==================== GROUP BY & HAVING ====================

    /// Add GROUP BY columns.
    pub fn group_by(mut self, columns: &[&str]) -> SqlResult<Self> {
        for col in columns {
            ident::sanitize(col)?;
            self.group_by.push((*col).to_string());
        }
        Ok(self)
    }

    /// Add a HAVING condition with an explicit operator.
    pub fn having_op(
        mut self,
        column: &str,
        op: impl IntoOp,
        value: impl Into<Value>,
    ) -> SqlResult<Self> {
        let cond = WhereCondition::new(column, op.into_op()?, value.into())?;
        self.having.push(cond);
        Ok(self)
    }

    /// Add a raw HAVING fragment with `?` placeholder markers.
    pub fn having_raw(mut self, sql: &str, params: Vec<Value>) -> SqlResult<Self> {
        self.having.push(WhereCondition::raw(sql, params)?);
        Ok(self)
    }

    // ==================== ORDER BY & pagination ====================

    /// Add an ORDER BY term.
    pub fn order_by(mut self, column: &str, direction: Direction) -> SqlResult<Self> {
        ident::sanitize(column)?;
        self.order_by.push(OrderClause {
            column: column.to_string(),
            direction,
        });
        Ok(self)
    }

    /// Add ORDER BY column ASC.
    pub fn order_by_asc(self, column: &str) -> SqlResult<Self> {
        self.order_by(column, Direction::Asc)
    }

    /// Add ORDER BY column DESC.
    pub fn order_by_desc(self, column: &str) -> SqlResult<Self> {
        self.order_by(column, Direction::Desc)
    }

    /// Set LIMIT.
    pub fn limit(mut self, n: i64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Set OFFSET.
    pub fn offset(mut self, n: i64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Pagination helper. `page` is 1-based; both arguments are clamped
    /// to >= 1.
    pub fn paginate(mut self, page: i64, per_page: i64) -> Self {
        let p = page.max(1);
        let size = per_page.max(1);
        self.limit = Some(size);
        self.offset = Some((p - 1) * size);
        self
    }

    // ==================== Window functions ====================

    /// Append a window function column.
    pub fn window(mut self, function: WindowFunction) -> Self {
        self.windows.push(function);
        self
    }

    /// Append `ROW_NUMBER() OVER (...)`.
    pub fn row_number(self, over: WindowSpec) -> Self {
        self.window(WindowFunction::row_number().over(over))
    }

    /// Append `RANK() OVER (...)`.
    pub fn rank(self, over: WindowSpec) -> Self {
        self.window(WindowFunction::rank().over(over))
    }

    /// Append `DENSE_RANK() OVER (...)`.
    pub fn dense_rank(self, over: WindowSpec) -> Self {
        self.window(WindowFunction::dense_rank().over(over))
    }

    /// Append `NTILE(buckets) OVER (...)`. The bucket count must be
    /// strictly positive; a bad count leaves the window list untouched.
    pub fn ntile(self, buckets: i64, over: WindowSpec) -> SqlResult<Self> {
        let wf = WindowFunction::ntile(buckets)?;
        Ok(self.window(wf.over(over)))
    }

    /// Append `LAG(column, offset) OVER (...)` with a default offset of 1.
    pub fn lag(self, column: &str, offset: Option<i64>, over: WindowSpec) -> SqlResult<Self> {
        let wf = WindowFunction::lag(column, offset)?;
        Ok(self.window(wf.over(over)))
    }

    /// Append `LEAD(column, offset) OVER (...)` with a default offset of 1.
    pub fn lead(self, column: &str, offset: Option<i64>, over: WindowSpec) -> SqlResult<Self> {
        let wf = WindowFunction::lead(column, offset)?;
        Ok(self.window(wf.over(over)))
    }

    // ==================== PIVOT / UNPIVOT / ORDINALITY ====================

    /// Attach a PIVOT clause.
    pub fn pivot(mut self, aggregate: &str, for_column: &str, in_values: Vec<Value>) -> SqlResult<Self> {
        self.pivot = Some(PivotSpec::new(aggregate, for_column, in_values)?);
        Ok(self)
    }

    /// Attach an UNPIVOT clause.
    pub fn unpivot(
        mut self,
        value_column: &str,
        name_column: &str,
        in_columns: &[&str],
    ) -> SqlResult<Self> {
        self.unpivot = Some(UnpivotSpec::new(value_column, name_column, in_columns)?);
        Ok(self)
    }

    /// Attach a WITH ORDINALITY marker.
    pub fn with_ordinality(mut self, alias: Option<&str>) -> SqlResult<Self> {
        self.ordinality = Some(OrdinalitySpec {
            alias: sanitize_alias(alias)?,
        });
        Ok(self)
    }

    // ==================== Set operations ====================

    fn set_op(mut self, kind: SetOpKind, query: Select) -> Self {
        self.set_ops.push(SetOperation {
            kind,
            query: Box::new(query),
        });
        self
    }

    /// Append `UNION query`.
    pub fn union(self, query: Select) -> Self {
        self.set_op(SetOpKind::Union, query)
    }

    /// Append `UNION ALL query`.
    pub fn union_all(self, query: Select) -> Self {
        self.set_op(SetOpKind::UnionAll, query)
    }

    /// Append `INTERSECT query`.
    pub fn intersect(self, query: Select) -> Self {
        self.set_op(SetOpKind::Intersect, query)
    }

    /// Append `EXCEPT query`.
    pub fn except(self, query: Select) -> Self {
        self.set_op(SetOpKind::Except, query)
    }

    /// Append a MINUS operation, compiled as `EXCEPT` on every dialect.
    pub fn minus(self, query: Select) -> Self {
        self.set_op(SetOpKind::Minus, query)
    }

    // ==================== Compilation ====================

    /// Compile for the given dialect.
    pub fn compile(&self, dialect: DialectKind) -> SqlResult<Statement> {
        self.compile_with(dialect.dialect())
    }

    /// Compile with an explicit dialect implementation.
    pub fn compile_with(&self, dialect: &dyn Dialect) -> SqlResult<Statement> {
        let mut compiler = Compiler::new(dialect);
        compiler.select(self)?;
        let statement = compiler.finish();
        tracing::debug!(
            dialect = dialect.name(),
            params = statement.params.len(),
            "compiled SELECT"
        );
        Ok(statement)
    }

    /// Render the SQL text only (for logging and tests).
    pub fn to_sql(&self, dialect: DialectKind) -> SqlResult<String> {
        Ok(self.compile(dialect)?.sql)
    }
}

pub(crate) fn sanitize_alias(alias: Option<&str>) -> SqlResult<Option<String>> {
    match alias {
        Some(a) => {
            ident::sanitize(a)?;
            Ok(Some(a.to_string()))
        }
        None => Ok(None),
    }
}
