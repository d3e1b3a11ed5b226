//! WHERE expression from an ordered list of filters.

use crate::ast::{FilterSpec, Operator};
use crate::error::ExtractResult;
use super::{Dialect, Inline, ParamContext, TranspileResult, ValueRenderer, render_identifier};

/// Builds one boolean expression from filter specs.
///
/// Clauses keep input order; each clause is followed by its own combinator
/// except the last. An empty list yields an empty string.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterExpressionBuilder {
    dialect: Dialect,
    honor_case_sensitivity: bool,
    quote_identifiers: bool,
}

impl FilterExpressionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// When set, filters not flagged case sensitive compare `LOWER()` of
    /// both sides.
    pub fn honor_case_sensitivity(mut self, yes: bool) -> Self {
        self.honor_case_sensitivity = yes;
        self
    }

    pub fn quote_identifiers(mut self, yes: bool) -> Self {
        self.quote_identifiers = yes;
        self
    }

    /// Render with escaped inline literals.
    pub fn build(&self, filters: &[FilterSpec]) -> ExtractResult<String> {
        self.build_with(filters, &mut Inline(self.dialect))
    }

    /// Render with bind placeholders.
    pub fn build_parameterized(&self, filters: &[FilterSpec]) -> ExtractResult<TranspileResult> {
        let mut ctx = ParamContext::new(self.dialect);
        let sql = self.build_with(filters, &mut ctx)?;
        Ok(ctx.finish(sql))
    }

    pub fn build_with<R: ValueRenderer>(
        &self,
        filters: &[FilterSpec],
        out: &mut R,
    ) -> ExtractResult<String> {
        let mut parts = Vec::with_capacity(filters.len() * 2);
        for (i, spec) in filters.iter().enumerate() {
            parts.push(self.clause(spec, out)?);
            if i + 1 < filters.len() {
                parts.push(spec.combinator.to_string());
            }
        }
        Ok(parts.join(" "))
    }

    fn clause<R: ValueRenderer>(&self, spec: &FilterSpec, out: &mut R) -> ExtractResult<String> {
        spec.validate()?;
        let fold = self.honor_case_sensitivity && !spec.case_sensitive;
        let column = render_identifier(&spec.column, self.dialect, self.quote_identifiers)?;
        let column = fold_case(&column, fold);
        let mut value = |v: &str| fold_case(&out.render(v), fold);

        let clause = match spec.op {
            Operator::Between => {
                let low = value(&spec.value);
                let high = value(spec.value2.as_deref().unwrap_or_default());
                format!("{} BETWEEN {} AND {}", column, low, high)
            }
            Operator::In => {
                let items: Vec<String> =
                    spec.in_items().into_iter().map(|item| value(item)).collect();
                format!("{} IN ({})", column, items.join(", "))
            }
            Operator::Like => {
                let pattern = value(&format!("%{}%", spec.value));
                format!("{} LIKE {}", column, pattern)
            }
            op => {
                let rhs = value(&spec.value);
                format!("{} {} {}", column, op, rhs)
            }
        };
        Ok(clause)
    }
}

fn fold_case(sql: &str, fold: bool) -> String {
    if fold {
        format!("LOWER({})", sql)
    } else {
        sql.to_string()
    }
}

/// Build a WHERE expression with default options.
pub fn build_filter_sql(filters: &[FilterSpec]) -> ExtractResult<String> {
    FilterExpressionBuilder::new().build(filters)
}
