//! Window function types.

use crate::error::{SqlError, SqlResult};
use crate::ident;
use crate::model::clause::{Direction, OrderClause};
use serde::{Deserialize, Serialize};

/// The supported window functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowFn {
    RowNumber,
    Rank,
    DenseRank,
    PercentRank,
    CumeDist,
    Ntile,
    Lag,
    Lead,
    FirstValue,
    LastValue,
    NthValue,
}

impl WindowFn {
    pub fn as_sql(&self) -> &'static str {
        match self {
            WindowFn::RowNumber => "ROW_NUMBER",
            WindowFn::Rank => "RANK",
            WindowFn::DenseRank => "DENSE_RANK",
            WindowFn::PercentRank => "PERCENT_RANK",
            WindowFn::CumeDist => "CUME_DIST",
            WindowFn::Ntile => "NTILE",
            WindowFn::Lag => "LAG",
            WindowFn::Lead => "LEAD",
            WindowFn::FirstValue => "FIRST_VALUE",
            WindowFn::LastValue => "LAST_VALUE",
            WindowFn::NthValue => "NTH_VALUE",
        }
    }
}

/// Frame unit keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameUnits {
    Rows,
    Range,
    Groups,
}

impl FrameUnits {
    pub fn as_sql(&self) -> &'static str {
        match self {
            FrameUnits::Rows => "ROWS",
            FrameUnits::Range => "RANGE",
            FrameUnits::Groups => "GROUPS",
        }
    }
}

/// A window frame: `ROWS BETWEEN <start> AND <end>` or `ROWS <start>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSpec {
    pub units: FrameUnits,
    pub start: String,
    pub end: Option<String>,
}

/// The OVER (...) specification.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WindowSpec {
    pub partition_by: Vec<String>,
    pub order_by: Vec<OrderClause>,
    pub frame: Option<FrameSpec>,
}

impl WindowSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add PARTITION BY columns (each sanitized).
    pub fn partition_by(mut self, columns: &[&str]) -> SqlResult<Self> {
        for col in columns {
            ident::sanitize(col)?;
            self.partition_by.push((*col).to_string());
        }
        Ok(self)
    }

    /// Add an ORDER BY term.
    pub fn order_by(mut self, column: &str, direction: Direction) -> SqlResult<Self> {
        ident::sanitize(column)?;
        self.order_by.push(OrderClause {
            column: column.to_string(),
            direction,
        });
        Ok(self)
    }

    /// Set the frame clause. Bound text is emitted verbatim
    /// (`UNBOUNDED PRECEDING`, `CURRENT ROW`, `1 FOLLOWING`, ...).
    pub fn frame(mut self, units: FrameUnits, start: &str, end: Option<&str>) -> Self {
        self.frame = Some(FrameSpec {
            units,
            start: start.to_string(),
            end: end.map(str::to_string),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.partition_by.is_empty() && self.order_by.is_empty() && self.frame.is_none()
    }
}

/// A window function invocation in the select list.
///
/// Numeric arguments (NTILE bucket count, LAG/LEAD offsets) are carried as
/// text so the argument-rendering path is uniform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowFunction {
    pub func: WindowFn,
    pub args: Vec<String>,
    pub over: Option<WindowSpec>,
    pub alias: Option<String>,
}

impl WindowFunction {
    fn bare(func: WindowFn) -> Self {
        Self {
            func,
            args: Vec::new(),
            over: None,
            alias: None,
        }
    }

    pub fn row_number() -> Self {
        Self::bare(WindowFn::RowNumber)
    }

    pub fn rank() -> Self {
        Self::bare(WindowFn::Rank)
    }

    pub fn dense_rank() -> Self {
        Self::bare(WindowFn::DenseRank)
    }

    pub fn percent_rank() -> Self {
        Self::bare(WindowFn::PercentRank)
    }

    pub fn cume_dist() -> Self {
        Self::bare(WindowFn::CumeDist)
    }

    /// NTILE with a strictly positive bucket count.
    pub fn ntile(buckets: i64) -> SqlResult<Self> {
        if buckets < 1 {
            return Err(SqlError::validation(format!(
                "NTILE bucket count must be positive, got {buckets}"
            )));
        }
        let mut wf = Self::bare(WindowFn::Ntile);
        wf.args.push(buckets.to_string());
        Ok(wf)
    }

    /// LAG over a column; the offset defaults to 1.
    pub fn lag(column: &str, offset: Option<i64>) -> SqlResult<Self> {
        ident::sanitize(column)?;
        let mut wf = Self::bare(WindowFn::Lag);
        wf.args.push(column.to_string());
        wf.args.push(offset.unwrap_or(1).to_string());
        Ok(wf)
    }

    /// LEAD over a column; the offset defaults to 1.
    pub fn lead(column: &str, offset: Option<i64>) -> SqlResult<Self> {
        ident::sanitize(column)?;
        let mut wf = Self::bare(WindowFn::Lead);
        wf.args.push(column.to_string());
        wf.args.push(offset.unwrap_or(1).to_string());
        Ok(wf)
    }

    pub fn first_value(column: &str) -> SqlResult<Self> {
        ident::sanitize(column)?;
        let mut wf = Self::bare(WindowFn::FirstValue);
        wf.args.push(column.to_string());
        Ok(wf)
    }

    pub fn last_value(column: &str) -> SqlResult<Self> {
        ident::sanitize(column)?;
        let mut wf = Self::bare(WindowFn::LastValue);
        wf.args.push(column.to_string());
        Ok(wf)
    }

    pub fn nth_value(column: &str, n: i64) -> SqlResult<Self> {
        ident::sanitize(column)?;
        if n < 1 {
            return Err(SqlError::validation(format!(
                "NTH_VALUE position must be positive, got {n}"
            )));
        }
        let mut wf = Self::bare(WindowFn::NthValue);
        wf.args.push(column.to_string());
        wf.args.push(n.to_string());
        Ok(wf)
    }

    /// Attach the OVER specification.
    pub fn over(mut self, spec: WindowSpec) -> Self {
        self.over = Some(spec);
        self
    }

    /// Set the output column alias.
    pub fn alias(mut self, alias: &str) -> SqlResult<Self> {
        ident::sanitize(alias)?;
        self.alias = Some(alias.to_string());
        Ok(self)
    }
}
