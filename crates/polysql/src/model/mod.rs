//! The structured query model: plain data records describing statement
//! clauses, with no behavior beyond construction-time validation.

pub mod clause;
pub mod condition;
pub mod join;
pub mod window;

pub use clause::{
    CteClause, Direction, OrderClause, OrdinalitySpec, PivotSpec, SelectColumn, SetOpKind,
    SetOperation, UnpivotSpec,
};
pub use condition::{CaseBranch, CaseExpr, Logical, WhereCondition};
pub use join::{JoinClause, JoinType, TableRef};
pub use window::{FrameSpec, FrameUnits, WindowFn, WindowFunction, WindowSpec};
