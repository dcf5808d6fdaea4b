//! Root query shapes and their builder mixins.
//!
//! Each root is a plain data model mutated by consuming-`self` mixin calls;
//! mixins that validate input return `SqlResult<Self>` and leave no
//! half-appended clause behind on failure.
//!
//! ```ignore
//! use polysql::{qb, DialectKind};
//!
//! let stmt = qb::select(&["id", "name"])?
//!     .from("users")?
//!     .gt("age", 18i64)?
//!     .compile(DialectKind::Postgres)?;
//! assert_eq!(stmt.sql, r#"SELECT "id", "name" FROM "users" WHERE "age" > $1"#);
//! ```

mod delete;
mod insert;
mod select;
mod update;

pub use delete::Delete;
pub use insert::{Insert, OnConflict, OnConflictUpdate, Upsert, UpsertAction, UpsertValue};
pub use select::Select;
pub use update::{SetValue, Update};

use crate::error::SqlResult;

/// Create a SELECT over the given columns. An empty list selects `*`.
pub fn select(columns: &[&str]) -> SqlResult<Select> {
    Select::new(columns)
}

/// Create a `SELECT *`.
pub fn select_all() -> Select {
    Select::all()
}

/// Create an INSERT into the given table.
pub fn insert(table: &str) -> SqlResult<Insert> {
    Insert::new(table)
}

/// Create an UPDATE of the given table.
pub fn update(table: &str) -> SqlResult<Update> {
    Update::new(table)
}

/// Create an empty DELETE; set the table with [`Delete::from`].
pub fn delete() -> Delete {
    Delete::new()
}

#[cfg(test)]
mod tests;
