//! # polysql
//!
//! A dialect-aware SQL query builder for Rust.
//!
//! ## Features
//!
//! - **Structured queries**: SELECT/INSERT/UPDATE/DELETE assembled through
//!   fluent, validating builder mixins
//! - **Three dialects**: one query model compiles to PostgreSQL, MySQL, or
//!   SQLite text with the right quoting and placeholder syntax
//! - **Injection defense**: identifiers pass a whitelist sanitizer, values
//!   are always parameter-bound (raw fragments are the one explicit bypass)
//! - **Deterministic output**: the same model and dialect always produce a
//!   byte-identical [`Statement`]
//! - **Feature gating**: PIVOT/UNPIVOT/ORDINALITY and friends compile where
//!   supported and fail with a suggested alternative where not
//!
//! ## Query Builder (qb)
//!
//! ```ignore
//! use polysql::{qb, DialectKind};
//!
//! // SELECT
//! let stmt = qb::select(&["id", "name"])?
//!     .from("users")?
//!     .gt("age", 18i64)?
//!     .compile(DialectKind::Postgres)?;
//! // SELECT "id", "name" FROM "users" WHERE "age" > $1   params: [18]
//!
//! // INSERT with upsert
//! let stmt = qb::insert("users")?
//!     .set("email", "alice@example.com")?
//!     .on_conflict(&["email"])?
//!     .do_update()
//!     .set_excluded("email")?
//!     .finish()?
//!     .compile(DialectKind::Sqlite)?;
//!
//! // The same model, recompiled for another dialect
//! let update = qb::update("users")?.set("name", "John")?.eq("id", 1i64)?;
//! let mysql = update.compile(DialectKind::MySql)?;
//! let pg = update.compile(DialectKind::Postgres)?;
//! ```
//!
//! Executing the compiled [`Statement`] against a live connection is out of
//! scope: hand `sql` and `params` to whatever driver owns the socket.

pub mod config;
pub mod dialect;
pub mod error;
pub mod ident;
pub mod model;
pub mod operator;
pub mod qb;
pub mod sanitize;
pub mod value;

pub use config::{DatabaseConfig, PoolConfig};
pub use dialect::{Dialect, DialectKind, Feature, JsonSyntax, LogicalType, MySql, Postgres, Sqlite, UpsertSyntax};
pub use error::{SqlError, SqlResult};
pub use model::{
    CaseBranch, CaseExpr, CteClause, Direction, FrameSpec, FrameUnits, JoinClause, JoinType,
    Logical, OrderClause, OrdinalitySpec, PivotSpec, SelectColumn, SetOpKind, SetOperation,
    TableRef, UnpivotSpec, WhereCondition, WindowFn, WindowFunction, WindowSpec,
};
pub use operator::{IntoOp, Op};
pub use qb::{
    delete, insert, select, select_all, update, Delete, Insert, OnConflict, OnConflictUpdate,
    Select, SetValue, Update, Upsert, UpsertAction, UpsertValue,
};
pub use sanitize::{escape_like, sanitize_text, sanitize_value};
pub use value::{ParamList, Statement, Value};
