//! Per-dialect compilation of the query model.
//!
//! The shared [`Compiler`] walks a statement in fixed clause order and the
//! [`Dialect`] trait supplies the points where the targets differ: quoting,
//! placeholder syntax, feature support, value escaping, upsert syntax, and
//! the logical-to-native type-name table.
//!
//! Compilation is a pure single pass: the model is read through `&self`,
//! never mutated, and the same model compiles to byte-identical output every
//! time.

mod mysql;
mod postgres;
mod sqlite;

pub use mysql::MySql;
pub use postgres::Postgres;
pub use sqlite::Sqlite;

use crate::error::{SqlError, SqlResult};
use crate::ident;
use crate::model::{
    CaseExpr, JoinClause, OrdinalitySpec, PivotSpec, SelectColumn, TableRef, UnpivotSpec,
    WhereCondition, WindowFunction, WindowSpec,
};
use crate::operator::Op;
use crate::qb::{Delete, Insert, Select, Update, UpsertAction, UpsertValue, SetValue};
use crate::sanitize::sanitize_value;
use crate::value::{ParamList, Statement, Value};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Dialect discriminator, derived from a config `type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    Postgres,
    MySql,
    Sqlite,
}

impl DialectKind {
    /// The canonical tag name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DialectKind::Postgres => "postgresql",
            DialectKind::MySql => "mysql",
            DialectKind::Sqlite => "sqlite",
        }
    }

    /// The dialect implementation behind this tag.
    pub fn dialect(&self) -> &'static dyn Dialect {
        match self {
            DialectKind::Postgres => &Postgres,
            DialectKind::MySql => &MySql,
            DialectKind::Sqlite => &Sqlite,
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DialectKind {
    type Err = SqlError;

    fn from_str(s: &str) -> SqlResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgresql" | "postgres" | "pg" => Ok(DialectKind::Postgres),
            "mysql" | "mariadb" => Ok(DialectKind::MySql),
            "sqlite" | "sqlite3" => Ok(DialectKind::Sqlite),
            other => Err(SqlError::validation(format!(
                "unknown dialect '{other}' (accepted: postgresql, mysql, sqlite)"
            ))),
        }
    }
}

/// Optional statement features a dialect may or may not implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Pivot,
    Unpivot,
    Ordinality,
    ArraySlice,
}

impl Feature {
    pub fn name(&self) -> &'static str {
        match self {
            Feature::Pivot => "PIVOT",
            Feature::Unpivot => "UNPIVOT",
            Feature::Ordinality => "WITH ORDINALITY",
            Feature::ArraySlice => "array slicing",
        }
    }

    /// The alternative suggested when a dialect rejects this feature.
    pub fn alternative(&self) -> &'static str {
        match self {
            Feature::Pivot => "CASE expressions with aggregation",
            Feature::Unpivot => "UNION ALL with CASE",
            Feature::Ordinality => "ROW_NUMBER()",
            Feature::ArraySlice => "JSON_EXTRACT",
        }
    }
}

/// Generic logical column types mapped to native type keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalType {
    Varchar,
    Char,
    Text,
    SmallInt,
    Int,
    BigInt,
    Float,
    Double,
    Decimal,
    Boolean,
    Date,
    Time,
    Timestamp,
    TimestampTz,
    Json,
    Uuid,
    Blob,
    Serial,
}

/// How a dialect spells its MERGE-like upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertSyntax {
    /// `ON CONFLICT (target) DO NOTHING | DO UPDATE SET ...`
    OnConflict,
    /// `INSERT IGNORE` / `ON DUPLICATE KEY UPDATE ...`
    OnDuplicateKey,
}

/// How a dialect spells JSON path extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonSyntax {
    /// `column ->> path`
    Arrow,
    /// `JSON_EXTRACT(column, path)`
    Function,
}

/// A target database family: quoting, placeholders, features, types.
pub trait Dialect: Send + Sync {
    /// Dialect name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Identifier quoting character.
    fn quote_char(&self) -> char;

    /// Write the placeholder for the 1-based parameter index.
    fn write_placeholder(&self, index: usize, out: &mut String);

    /// Whether this dialect compiles the given feature.
    fn supports(&self, feature: Feature) -> bool;

    /// Dialect-specific value escaping, applied after generic sanitation.
    fn escape_text(&self, text: &str) -> String;

    /// Native keyword for a logical column type.
    fn type_name(&self, ty: LogicalType) -> &'static str;

    fn upsert_syntax(&self) -> UpsertSyntax {
        UpsertSyntax::OnConflict
    }

    fn json_syntax(&self) -> JsonSyntax {
        JsonSyntax::Function
    }
}

/// Single-pass statement renderer shared by all dialects.
pub(crate) struct Compiler<'d> {
    dialect: &'d dyn Dialect,
    sql: String,
    params: ParamList,
}

impl<'d> Compiler<'d> {
    pub fn new(dialect: &'d dyn Dialect) -> Self {
        Self {
            dialect,
            sql: String::new(),
            params: ParamList::new(),
        }
    }

    pub fn finish(self) -> Statement {
        Statement {
            sql: self.sql,
            params: self.params.into_values(),
        }
    }

    fn push(&mut self, text: &str) {
        self.sql.push_str(text);
    }

    /// Sanitize and embed an identifier: `*` verbatim, plain identifiers
    /// quoted part by part, whitelisted expressions verbatim.
    fn push_ident(&mut self, raw: &str) -> SqlResult<()> {
        if raw == "*" {
            self.sql.push('*');
            return Ok(());
        }
        ident::sanitize(raw)?;
        if ident::is_plain(raw) {
            let quote = self.dialect.quote_char();
            for (i, part) in raw.split('.').enumerate() {
                if i > 0 {
                    self.sql.push('.');
                }
                self.sql.push(quote);
                self.sql.push_str(part);
                self.sql.push(quote);
            }
        } else {
            self.sql.push_str(raw);
        }
        Ok(())
    }

    /// Sanitize a value, apply dialect escaping, bind it, and write its
    /// placeholder.
    fn bind(&mut self, value: Value) {
        let value = escape_for_dialect(sanitize_value(value), self.dialect);
        let index = self.params.push(value);
        self.dialect.write_placeholder(index, &mut self.sql);
    }

    fn unsupported(&self, feature: Feature) -> SqlError {
        SqlError::unsupported(feature.name(), self.dialect.name(), feature.alternative())
    }

    // ==================== SELECT ====================

    pub fn select(&mut self, query: &Select) -> SqlResult<()> {
        self.cte_clause(query)?;

        self.push("SELECT ");
        if query.distinct {
            self.push("DISTINCT ");
        }
        self.select_list(query)?;

        if let Some(from) = &query.from {
            self.push(" FROM ");
            self.table_ref(from)?;
        }

        for join in &query.joins {
            self.join_clause(join)?;
        }

        self.condition_clause(" WHERE ", &query.wheres, false)?;

        if !query.group_by.is_empty() {
            self.push(" GROUP BY ");
            for (i, col) in query.group_by.iter().enumerate() {
                if i > 0 {
                    self.push(", ");
                }
                self.push_ident(col)?;
            }
        }

        self.condition_clause(" HAVING ", &query.having, false)?;

        if !query.order_by.is_empty() {
            self.push(" ORDER BY ");
            for (i, order) in query.order_by.iter().enumerate() {
                if i > 0 {
                    self.push(", ");
                }
                self.push_ident(&order.column)?;
                self.push(" ");
                self.push(order.direction.as_sql());
            }
        }

        if let Some(limit) = query.limit {
            self.push(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = query.offset {
            self.push(&format!(" OFFSET {offset}"));
        }

        if let Some(pivot) = &query.pivot {
            self.pivot_clause(pivot)?;
        }
        if let Some(unpivot) = &query.unpivot {
            self.unpivot_clause(unpivot)?;
        }
        if let Some(ordinality) = &query.ordinality {
            self.ordinality_clause(ordinality)?;
        }

        for set_op in &query.set_ops {
            self.push(" ");
            self.push(set_op.kind.as_sql());
            self.push(" ");
            self.select(&set_op.query)?;
        }

        Ok(())
    }

    fn cte_clause(&mut self, query: &Select) -> SqlResult<()> {
        if query.ctes.is_empty() {
            return Ok(());
        }
        if query.ctes.iter().any(|cte| cte.recursive) {
            self.push("WITH RECURSIVE ");
        } else {
            self.push("WITH ");
        }
        for (i, cte) in query.ctes.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.push_ident(&cte.name)?;
            self.push(" AS (");
            self.select(&cte.query)?;
            self.push(")");
        }
        self.push(" ");
        Ok(())
    }

    fn select_list(&mut self, query: &Select) -> SqlResult<()> {
        if query.columns.is_empty() {
            self.push("*");
        } else {
            for (i, column) in query.columns.iter().enumerate() {
                if i > 0 {
                    self.push(", ");
                }
                self.select_column(column)?;
            }
        }
        for window in &query.windows {
            self.push(", ");
            self.window_fn(window)?;
        }
        Ok(())
    }

    fn select_column(&mut self, column: &SelectColumn) -> SqlResult<()> {
        match column {
            SelectColumn::Column(col) => self.push_ident(col),
            SelectColumn::Case(case) => self.case_expr(case),
            SelectColumn::Coalesce { columns, alias } => {
                self.push("COALESCE(");
                for (i, col) in columns.iter().enumerate() {
                    if i > 0 {
                        self.push(", ");
                    }
                    self.push_ident(col)?;
                }
                self.push(")");
                self.alias_suffix(alias)
            }
            SelectColumn::NullIf {
                first,
                second,
                alias,
            } => {
                self.push("NULLIF(");
                self.push_ident(first)?;
                self.push(", ");
                self.push_ident(second)?;
                self.push(")");
                self.alias_suffix(alias)
            }
            SelectColumn::JsonExtract {
                column,
                path,
                alias,
            } => {
                match self.dialect.json_syntax() {
                    JsonSyntax::Arrow => {
                        self.push_ident(column)?;
                        self.push(" ->> ");
                        self.bind(Value::Text(path.clone()));
                    }
                    JsonSyntax::Function => {
                        self.push("JSON_EXTRACT(");
                        self.push_ident(column)?;
                        self.push(", ");
                        self.bind(Value::Text(path.clone()));
                        self.push(")");
                    }
                }
                self.alias_suffix(alias)
            }
            SelectColumn::ArraySlice {
                column,
                from,
                to,
                alias,
            } => {
                if !self.dialect.supports(Feature::ArraySlice) {
                    return Err(self.unsupported(Feature::ArraySlice));
                }
                self.push("(");
                self.push_ident(column)?;
                self.push(&format!(")[{from}:{to}]"));
                self.alias_suffix(alias)
            }
        }
    }

    fn case_expr(&mut self, case: &CaseExpr) -> SqlResult<()> {
        self.push("CASE");
        for branch in &case.branches {
            self.push(" WHEN ");
            // Branch conditions are caller-trusted fragments.
            self.push(&branch.when);
            self.push(" THEN ");
            self.bind(branch.then.clone());
        }
        self.push(" END");
        self.alias_suffix(&case.alias)
    }

    fn window_fn(&mut self, window: &WindowFunction) -> SqlResult<()> {
        self.push(window.func.as_sql());
        self.push("(");
        for (i, arg) in window.args.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            // Column arguments are quoted; numeric arguments pass verbatim.
            if ident::is_plain(arg) {
                self.push_ident(arg)?;
            } else {
                self.push(arg);
            }
        }
        self.push(") OVER (");
        if let Some(spec) = &window.over {
            self.window_spec(spec)?;
        }
        self.push(")");
        self.alias_suffix(&window.alias)
    }

    fn window_spec(&mut self, spec: &WindowSpec) -> SqlResult<()> {
        let mut wrote = false;
        if !spec.partition_by.is_empty() {
            self.push("PARTITION BY ");
            for (i, col) in spec.partition_by.iter().enumerate() {
                if i > 0 {
                    self.push(", ");
                }
                self.push_ident(col)?;
            }
            wrote = true;
        }
        if !spec.order_by.is_empty() {
            if wrote {
                self.push(" ");
            }
            self.push("ORDER BY ");
            for (i, order) in spec.order_by.iter().enumerate() {
                if i > 0 {
                    self.push(", ");
                }
                self.push_ident(&order.column)?;
                self.push(" ");
                self.push(order.direction.as_sql());
            }
            wrote = true;
        }
        if let Some(frame) = &spec.frame {
            if wrote {
                self.push(" ");
            }
            self.push(frame.units.as_sql());
            match &frame.end {
                Some(end) => {
                    self.push(" BETWEEN ");
                    self.push(&frame.start);
                    self.push(" AND ");
                    self.push(end);
                }
                None => {
                    self.push(" ");
                    self.push(&frame.start);
                }
            }
        }
        Ok(())
    }

    fn table_ref(&mut self, table: &TableRef) -> SqlResult<()> {
        match table {
            TableRef::Table(name) => self.push_ident(name),
            TableRef::Subquery { query, alias } => {
                self.push("(");
                self.select(query)?;
                self.push(") AS ");
                self.push_ident(alias)
            }
        }
    }

    fn join_clause(&mut self, join: &JoinClause) -> SqlResult<()> {
        self.push(" ");
        self.push(join.join_type.as_sql());
        self.push(" ");
        self.table_ref(&join.table)?;
        if !join.on.is_empty() {
            self.push(" ON ");
            self.conditions(&join.on, true)?;
        }
        Ok(())
    }

    fn condition_clause(
        &mut self,
        keyword: &str,
        conditions: &[WhereCondition],
        as_join: bool,
    ) -> SqlResult<()> {
        if conditions.is_empty() {
            return Ok(());
        }
        self.push(keyword);
        self.conditions(conditions, as_join)
    }

    fn conditions(&mut self, conditions: &[WhereCondition], as_join: bool) -> SqlResult<()> {
        for (i, cond) in conditions.iter().enumerate() {
            if i > 0 {
                self.push(" ");
                self.push(cond.logical.as_sql());
                self.push(" ");
            }
            self.condition(cond, as_join)?;
        }
        Ok(())
    }

    fn condition(&mut self, cond: &WhereCondition, as_join: bool) -> SqlResult<()> {
        match cond.op {
            Op::Raw => {
                let params = match &cond.value {
                    Value::Array(items) => items.clone(),
                    other => vec![other.clone()],
                };
                self.raw_fragment(&cond.column, params);
                Ok(())
            }
            Op::IsNull | Op::IsNotNull => {
                self.push_ident(&cond.column)?;
                self.push(" ");
                self.push(cond.op.as_sql());
                Ok(())
            }
            Op::In | Op::NotIn => {
                let items = match &cond.value {
                    Value::Array(items) => items.clone(),
                    other => vec![other.clone()],
                };
                if items.is_empty() {
                    // An empty IN list can never match; NOT IN always does.
                    self.push(if cond.op == Op::In { "1=0" } else { "1=1" });
                    return Ok(());
                }
                self.push_ident(&cond.column)?;
                self.push(" ");
                self.push(cond.op.as_sql());
                self.push(" (");
                for (i, item) in items.into_iter().enumerate() {
                    if i > 0 {
                        self.push(", ");
                    }
                    self.bind(item);
                }
                self.push(")");
                Ok(())
            }
            Op::Between | Op::NotBetween => {
                let items = match &cond.value {
                    Value::Array(items) if items.len() == 2 => items.clone(),
                    _ => {
                        return Err(SqlError::validation(format!(
                            "{} requires exactly two bounds",
                            cond.op.as_sql()
                        )));
                    }
                };
                self.push_ident(&cond.column)?;
                self.push(" ");
                self.push(cond.op.as_sql());
                self.push(" ");
                self.bind(items[0].clone());
                self.push(" AND ");
                self.bind(items[1].clone());
                Ok(())
            }
            _ => {
                self.push_ident(&cond.column)?;
                self.push(" ");
                self.push(cond.op.as_sql());
                self.push(" ");
                if as_join {
                    // Join ON compares columns; the right side is an
                    // identifier, not a bound parameter.
                    match &cond.value {
                        Value::Text(column) => self.push_ident(column),
                        other => Err(SqlError::validation(format!(
                            "join ON comparison requires a column name, got {other:?}"
                        ))),
                    }
                } else {
                    self.bind(cond.value.clone());
                    Ok(())
                }
            }
        }
    }

    /// Splice a raw fragment, substituting a placeholder for each `?`.
    fn raw_fragment(&mut self, sql: &str, params: Vec<Value>) {
        let mut params = params.into_iter();
        for ch in sql.chars() {
            if ch == '?' {
                match params.next() {
                    Some(value) => self.bind(value),
                    None => self.sql.push('?'),
                }
            } else {
                self.sql.push(ch);
            }
        }
    }

    fn pivot_clause(&mut self, pivot: &PivotSpec) -> SqlResult<()> {
        if !self.dialect.supports(Feature::Pivot) {
            return Err(self.unsupported(Feature::Pivot));
        }
        self.push(" PIVOT (");
        self.push_ident(&pivot.aggregate)?;
        self.push(" FOR ");
        self.push_ident(&pivot.for_column)?;
        self.push(" IN (");
        for (i, value) in pivot.in_values.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.bind(value.clone());
        }
        self.push("))");
        Ok(())
    }

    fn unpivot_clause(&mut self, unpivot: &UnpivotSpec) -> SqlResult<()> {
        if !self.dialect.supports(Feature::Unpivot) {
            return Err(self.unsupported(Feature::Unpivot));
        }
        self.push(" UNPIVOT (");
        self.push_ident(&unpivot.value_column)?;
        self.push(" FOR ");
        self.push_ident(&unpivot.name_column)?;
        self.push(" IN (");
        for (i, col) in unpivot.in_columns.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.push_ident(col)?;
        }
        self.push("))");
        Ok(())
    }

    fn ordinality_clause(&mut self, ordinality: &OrdinalitySpec) -> SqlResult<()> {
        if !self.dialect.supports(Feature::Ordinality) {
            return Err(self.unsupported(Feature::Ordinality));
        }
        self.push(" WITH ORDINALITY");
        if let Some(alias) = &ordinality.alias {
            self.push(" AS ");
            self.push_ident(alias)?;
        }
        Ok(())
    }

    fn alias_suffix(&mut self, alias: &Option<String>) -> SqlResult<()> {
        if let Some(alias) = alias {
            self.push(" AS ");
            self.push_ident(alias)?;
        }
        Ok(())
    }

    // ==================== INSERT ====================

    pub fn insert(&mut self, query: &Insert) -> SqlResult<()> {
        if query.rows.is_empty() || query.columns.is_empty() {
            return Err(SqlError::validation(
                "INSERT requires at least one column and row",
            ));
        }

        let ignore = matches!(
            (&query.upsert, self.dialect.upsert_syntax()),
            (
                Some(upsert),
                UpsertSyntax::OnDuplicateKey
            ) if upsert.action == UpsertAction::DoNothing
        );
        self.push(if ignore {
            "INSERT IGNORE INTO "
        } else {
            "INSERT INTO "
        });
        self.push_ident(&query.table)?;

        self.push(" (");
        for (i, col) in query.columns.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.push_ident(col)?;
        }
        self.push(") VALUES ");
        for (i, row) in query.rows.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.push("(");
            for (j, value) in row.iter().enumerate() {
                if j > 0 {
                    self.push(", ");
                }
                self.bind(value.clone());
            }
            self.push(")");
        }

        if let Some(upsert) = &query.upsert {
            match self.dialect.upsert_syntax() {
                UpsertSyntax::OnConflict => {
                    self.push(" ON CONFLICT (");
                    for (i, col) in upsert.target.iter().enumerate() {
                        if i > 0 {
                            self.push(", ");
                        }
                        self.push_ident(col)?;
                    }
                    self.push(")");
                    match &upsert.action {
                        UpsertAction::DoNothing => self.push(" DO NOTHING"),
                        UpsertAction::DoUpdate(sets) => {
                            self.push(" DO UPDATE SET ");
                            for (i, (col, value)) in sets.iter().enumerate() {
                                if i > 0 {
                                    self.push(", ");
                                }
                                self.push_ident(col)?;
                                self.push(" = ");
                                match value {
                                    UpsertValue::Value(v) => self.bind(v.clone()),
                                    UpsertValue::Excluded(excluded) => {
                                        self.push("EXCLUDED.");
                                        self.push_ident(excluded)?;
                                    }
                                }
                            }
                        }
                    }
                }
                UpsertSyntax::OnDuplicateKey => {
                    if let UpsertAction::DoUpdate(sets) = &upsert.action {
                        self.push(" ON DUPLICATE KEY UPDATE ");
                        for (i, (col, value)) in sets.iter().enumerate() {
                            if i > 0 {
                                self.push(", ");
                            }
                            self.push_ident(col)?;
                            self.push(" = ");
                            match value {
                                UpsertValue::Value(v) => self.bind(v.clone()),
                                UpsertValue::Excluded(excluded) => {
                                    self.push("VALUES(");
                                    self.push_ident(excluded)?;
                                    self.push(")");
                                }
                            }
                        }
                    }
                }
            }
        }

        self.returning_clause(&query.returning)
    }

    // ==================== UPDATE ====================

    pub fn update(&mut self, query: &Update) -> SqlResult<()> {
        if query.sets.is_empty() {
            return Err(SqlError::validation("UPDATE requires a non-empty SET clause"));
        }
        self.push("UPDATE ");
        self.push_ident(&query.table)?;
        self.push(" SET ");
        for (i, (col, value)) in query.sets.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.push_ident(col)?;
            self.push(" = ");
            match value {
                SetValue::Value(v) => self.bind(v.clone()),
                SetValue::Raw(expr) => self.push(expr),
            }
        }
        self.condition_clause(" WHERE ", &query.wheres, false)?;
        self.returning_clause(&query.returning)
    }

    // ==================== DELETE ====================

    pub fn delete(&mut self, query: &Delete) -> SqlResult<()> {
        let Some(table) = &query.from else {
            return Err(SqlError::validation("DELETE requires a target table"));
        };
        self.push("DELETE FROM ");
        self.push_ident(table)?;
        self.condition_clause(" WHERE ", &query.wheres, false)?;
        self.returning_clause(&query.returning)
    }

    fn returning_clause(&mut self, columns: &[String]) -> SqlResult<()> {
        if columns.is_empty() {
            return Ok(());
        }
        self.push(" RETURNING ");
        for (i, col) in columns.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.push_ident(col)?;
        }
        Ok(())
    }
}

/// Apply the dialect's extra escaping pass to text content, recursing into
/// arrays.
fn escape_for_dialect(value: Value, dialect: &dyn Dialect) -> Value {
    match value {
        Value::Text(s) => Value::Text(dialect.escape_text(&s)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| escape_for_dialect(item, dialect))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialect_kind_parses_aliases() {
        assert_eq!("postgres".parse::<DialectKind>().unwrap(), DialectKind::Postgres);
        assert_eq!("PostgreSQL".parse::<DialectKind>().unwrap(), DialectKind::Postgres);
        assert_eq!("mariadb".parse::<DialectKind>().unwrap(), DialectKind::MySql);
        assert_eq!("sqlite3".parse::<DialectKind>().unwrap(), DialectKind::Sqlite);
        assert!("oracle".parse::<DialectKind>().is_err());
    }

    #[test]
    fn raw_fragment_substitutes_question_marks() {
        let mut compiler = Compiler::new(&Postgres);
        compiler.raw_fragment("a = ? AND b = ?", vec![Value::Int(1), Value::Int(2)]);
        let stmt = compiler.finish();
        assert_eq!(stmt.sql, "a = $1 AND b = $2");
        assert_eq!(stmt.params, vec![Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn raw_fragment_keeps_unmatched_markers() {
        let mut compiler = Compiler::new(&MySql);
        compiler.raw_fragment("a = ? AND b = ?", vec![Value::Int(1)]);
        let stmt = compiler.finish();
        assert_eq!(stmt.sql, "a = ? AND b = ?");
        assert_eq!(stmt.params.len(), 1);
    }

    #[test]
    fn type_names_differ_per_dialect() {
        assert_eq!(Postgres.type_name(LogicalType::Json), "JSONB");
        assert_eq!(MySql.type_name(LogicalType::Json), "JSON");
        assert_eq!(Sqlite.type_name(LogicalType::Json), "TEXT");
        assert_eq!(Postgres.type_name(LogicalType::Uuid), "UUID");
        assert_eq!(MySql.type_name(LogicalType::Uuid), "CHAR(36)");
    }
}
