//! Final SELECT statement from a source, a filter and a CASE column.

use tracing::warn;

use crate::error::ExtractResult;
use super::{Dialect, render_identifier};

/// Combines the pieces into one statement.
///
/// With a CASE column the query reads through a `base` CTE and, unless
/// [`QueryComposer::apply_filter_with_case`] is set, the filter is not
/// applied.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryComposer {
    dialect: Dialect,
    apply_filter_with_case: bool,
    quote_identifiers: bool,
}

impl QueryComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Quote the source name for the dialect.
    pub fn quote_identifiers(mut self, yes: bool) -> Self {
        self.quote_identifiers = yes;
        self
    }

    /// Move the filter into the CTE body instead of dropping it.
    pub fn apply_filter_with_case(mut self, yes: bool) -> Self {
        self.apply_filter_with_case = yes;
        self
    }

    pub fn compose(
        &self,
        source: &str,
        filter_expr: &str,
        case_expr: Option<&str>,
    ) -> ExtractResult<String> {
        let source = render_identifier(source, self.dialect, self.quote_identifiers)?;
        let filter_expr = filter_expr.trim();
        let case_expr = case_expr.filter(|expr| !expr.trim().is_empty());

        let sql = match case_expr {
            Some(case_expr) => {
                let base = if self.apply_filter_with_case && !filter_expr.is_empty() {
                    format!("SELECT * FROM {} WHERE {}", source, filter_expr)
                } else {
                    if !filter_expr.is_empty() {
                        warn!(%source, "filter not applied because a CASE column is present");
                    }
                    format!("SELECT * FROM {}", source)
                };
                format!("WITH base AS ({}) SELECT *, {} FROM base", base, case_expr)
            }
            None if filter_expr.is_empty() => format!("SELECT * FROM {}", source),
            None => format!("SELECT * FROM {} WHERE {}", source, filter_expr),
        };
        Ok(sql)
    }
}
