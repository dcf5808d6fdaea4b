//! INSERT query model, batch rows, and the upsert builder.

use crate::dialect::{Compiler, Dialect, DialectKind};
use crate::error::{SqlError, SqlResult};
use crate::ident;
use crate::value::{Statement, Value};
use serde::{Deserialize, Serialize};

/// Conflict resolution action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UpsertAction {
    /// Skip conflicting rows (`DO NOTHING` / `INSERT IGNORE`).
    DoNothing,
    /// Update conflicting rows.
    DoUpdate(Vec<(String, UpsertValue)>),
}

/// Value assigned by a conflict update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UpsertValue {
    /// A bound parameter.
    Value(Value),
    /// The would-be inserted value for a column (`EXCLUDED.col` /
    /// `VALUES(col)`).
    Excluded(String),
}

/// The MERGE-like upsert clause, compiled in each dialect's native form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Upsert {
    pub target: Vec<String>,
    pub action: UpsertAction,
}

/// A structured INSERT statement.
///
/// Single-row input via [`Insert::set`]; batch input via [`Insert::rows`],
/// which derives the shared column list from the first row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insert {
    pub(crate) table: String,
    pub(crate) columns: Vec<String>,
    pub(crate) rows: Vec<Vec<Value>>,
    pub(crate) upsert: Option<Upsert>,
    pub(crate) returning: Vec<String>,
}

impl Insert {
    /// Create an INSERT into the given table.
    pub fn new(table: &str) -> SqlResult<Self> {
        ident::sanitize(table)?;
        Ok(Self {
            table: table.to_string(),
            columns: Vec::new(),
            rows: Vec::new(),
            upsert: None,
            returning: Vec::new(),
        })
    }

    /// Set a column value on the single-row form.
    pub fn set(mut self, column: &str, value: impl Into<Value>) -> SqlResult<Self> {
        if self.rows.len() > 1 {
            return Err(SqlError::validation(
                "cannot mix set() with batch rows()",
            ));
        }
        ident::sanitize(column)?;
        self.columns.push(column.to_string());
        if self.rows.is_empty() {
            self.rows.push(Vec::new());
        }
        self.rows[0].push(value.into());
        Ok(self)
    }

    /// Set an optional column value (None is skipped).
    pub fn set_opt(self, column: &str, value: Option<impl Into<Value>>) -> SqlResult<Self> {
        match value {
            Some(v) => self.set(column, v),
            None => Ok(self),
        }
    }

    /// Batch input: one VALUES tuple per row.
    ///
    /// The shared column list comes from the first row; later rows are
    /// matched by column name and missing entries become NULL.
    pub fn rows(mut self, batch: Vec<Vec<(&str, Value)>>) -> SqlResult<Self> {
        let Some(first) = batch.first() else {
            return Err(SqlError::validation("batch insert requires at least one row"));
        };
        if !self.columns.is_empty() {
            return Err(SqlError::validation(
                "cannot mix set() with batch rows()",
            ));
        }
        let mut columns = Vec::with_capacity(first.len());
        for (col, _) in first {
            ident::sanitize(col)?;
            columns.push((*col).to_string());
        }
        let mut rows = Vec::with_capacity(batch.len());
        for row in &batch {
            let tuple = columns
                .iter()
                .map(|col| {
                    row.iter()
                        .find(|(name, _)| *name == col.as_str())
                        .map(|(_, v)| v.clone())
                        .unwrap_or(Value::Null)
                })
                .collect();
            rows.push(tuple);
        }
        self.columns = columns;
        self.rows = rows;
        Ok(self)
    }

    /// Start the upsert clause over the given conflict-target columns.
    pub fn on_conflict(self, target: &[&str]) -> SqlResult<OnConflict> {
        let mut cols = Vec::with_capacity(target.len());
        for col in target {
            ident::sanitize(col)?;
            cols.push((*col).to_string());
        }
        Ok(OnConflict {
            insert: self,
            target: cols,
        })
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
        compiler.insert(self)?;
        let statement = compiler.finish();
        tracing::debug!(
            dialect = dialect.name(),
            params = statement.params.len(),
            rows = self.rows.len(),
            "compiled INSERT"
        );
        Ok(statement)
    }

    /// Render the SQL text only (for logging and tests).
    pub fn to_sql(&self, dialect: DialectKind) -> SqlResult<String> {
        Ok(self.compile(dialect)?.sql)
    }
}

/// Upsert builder: pick the conflict action.
pub struct OnConflict {
    insert: Insert,
    target: Vec<String>,
}

impl OnConflict {
    /// Skip conflicting rows.
    pub fn do_nothing(mut self) -> Insert {
        self.insert.upsert = Some(Upsert {
            target: self.target,
            action: UpsertAction::DoNothing,
        });
        self.insert
    }

    /// Update conflicting rows; configure the SET list and call
    /// [`OnConflictUpdate::finish`].
    pub fn do_update(self) -> OnConflictUpdate {
        OnConflictUpdate {
            insert: self.insert,
            target: self.target,
            sets: Vec::new(),
        }
    }
}

/// Builder for the DO UPDATE arm of an upsert.
pub struct OnConflictUpdate {
    insert: Insert,
    target: Vec<String>,
    sets: Vec<(String, UpsertValue)>,
}

impl OnConflictUpdate {
    /// Set a column to a bound value.
    pub fn set(mut self, column: &str, value: impl Into<Value>) -> SqlResult<Self> {
        ident::sanitize(column)?;
        self.sets
            .push((column.to_string(), UpsertValue::Value(value.into())));
        Ok(self)
    }

    /// Set a column to its would-be inserted value.
    pub fn set_excluded(mut self, column: &str) -> SqlResult<Self> {
        ident::sanitize(column)?;
        self.sets
            .push((column.to_string(), UpsertValue::Excluded(column.to_string())));
        Ok(self)
    }

    /// Finish and return the INSERT.
    pub fn finish(mut self) -> SqlResult<Insert> {
        if self.sets.is_empty() {
            return Err(SqlError::validation(
                "DO UPDATE requires at least one SET column",
            ));
        }
        self.insert.upsert = Some(Upsert {
            target: self.target,
            action: UpsertAction::DoUpdate(self.sets),
        });
        Ok(self.insert)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_builds_one_row() {
        let insert = Insert::new("users")
            .unwrap()
            .set("username", "alice")
            .unwrap()
            .set("age", 30i64)
            .unwrap();
        assert_eq!(insert.columns, vec!["username", "age"]);
        assert_eq!(insert.rows.len(), 1);
        assert_eq!(insert.rows[0].len(), 2);
    }

    #[test]
    fn rows_derives_columns_from_first_row() {
        let insert = Insert::new("users")
            .unwrap()
            .rows(vec![
                vec![("name", "a".into()), ("age", 1i64.into())],
                vec![("age", 2i64.into()), ("name", "b".into())],
                vec![("name", "c".into())],
            ])
            .unwrap();
        assert_eq!(insert.columns, vec!["name", "age"]);
        assert_eq!(insert.rows[1], vec![Value::Text("b".into()), Value::Int(2)]);
        assert_eq!(insert.rows[2], vec![Value::Text("c".into()), Value::Null]);
    }

    #[test]
    fn empty_batch_is_rejected() {
        assert!(Insert::new("users").unwrap().rows(vec![]).is_err());
    }

    #[test]
    fn do_update_requires_a_set() {
        let result = Insert::new("users")
            .unwrap()
            .set("name", "a")
            .unwrap()
            .on_conflict(&["id"])
            .unwrap()
            .do_update()
            .finish();
        assert!(result.is_err());
    }
}
