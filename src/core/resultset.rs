// src/core/resultset.rs

//! The result-set value handed back to the protocol layer for encoding.

/// A structured query result as the protocol layer consumes it: either a
/// rows/columns payload from backend execution, or a bare affected-row count
/// for intercepted commands and no-ops.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    /// Column names, in wire order. Empty for non-SELECT results.
    pub columns: Vec<String>,
    /// Row values, one `Vec` per row, aligned with `columns`.
    pub rows: Vec<Vec<String>>,
    /// Affected-row count for DML and intercepted commands.
    pub rows_affected: u64,
}

impl ResultSet {
    /// The zero-row, zero-column success shape used for compatibility no-ops.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A result carrying only an affected-row count (e.g. a successful KILL).
    pub fn affected(rows_affected: u64) -> Self {
        Self {
            rows_affected,
            ..Self::default()
        }
    }

    /// True if the result carries no rows, no columns, and no affected count.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.rows.is_empty() && self.rows_affected == 0
    }
}
