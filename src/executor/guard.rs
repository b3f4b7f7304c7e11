//! Result size guard
//!
//! Checked after filtering and before projection, so no projection work is
//! spent on a result that will be rejected.

use crate::query::{QueryError, QueryResult};

/// Maximum number of rows a query may return
pub const MAX_RESULT_ROWS: usize = 5000;

/// Enforces the row limit
#[derive(Debug, Clone, Copy)]
pub struct ResultGuard {
    limit: usize,
}

impl Default for ResultGuard {
    fn default() -> Self {
        Self {
            limit: MAX_RESULT_ROWS,
        }
    }
}

impl ResultGuard {
    /// Guard with a custom limit
    pub fn with_limit(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Fails with `ResultTooLarge` when `matched` exceeds the limit.
    pub fn check(&self, matched: usize) -> QueryResult<()> {
        if matched > self.limit {
            return Err(QueryError::result_too_large(matched, self.limit));
        }
        Ok(())
    }
}
