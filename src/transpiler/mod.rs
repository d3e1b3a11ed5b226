//! SQL generation for extracts.
//!
//! Turns filter specs and CASE rules into SQL text, either with escaped
//! inline literals (what gets previewed and saved as a view) or with bind
//! placeholders and an ordered parameter list.

pub mod case_when;
pub mod catalog;
pub mod compose;
pub mod ddl;
pub mod dialect;
pub mod escape;
pub mod filter;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ast::{CaseRule, FilterSpec};
use crate::error::ExtractResult;

pub use case_when::{CaseExpressionBuilder, build_case_when};
pub use compose::QueryComposer;
pub use dialect::Dialect;
pub use escape::{render_identifier, validate_identifier};
pub use filter::{FilterExpressionBuilder, build_filter_sql};

/// Result of transpilation with extracted parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TranspileResult {
    /// SQL with placeholders ($1, $2 or ?, ?)
    pub sql: String,
    /// Parameter values in placeholder order
    pub params: Vec<String>,
}

impl TranspileResult {
    pub fn new(sql: impl Into<String>, params: Vec<String>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Create a result with no parameters.
    pub fn sql_only(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }
}

/// Renders a user supplied value into SQL text.
pub trait ValueRenderer {
    fn render(&mut self, value: &str) -> String;
}

/// Renders values as escaped string literals.
#[derive(Debug, Clone, Copy, Default)]
pub struct Inline(pub Dialect);

impl ValueRenderer for Inline {
    fn render(&mut self, value: &str) -> String {
        self.0.quote_literal(value)
    }
}

/// Collects values as bind parameters.
#[derive(Debug, Default)]
pub struct ParamContext {
    dialect: Dialect,
    params: Vec<String>,
}

impl ParamContext {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            params: Vec::new(),
        }
    }

    /// Add a value and return the placeholder for it.
    pub fn add_param(&mut self, value: &str) -> String {
        self.params.push(value.to_string());
        self.dialect.placeholder(self.params.len())
    }

    pub fn finish(self, sql: String) -> TranspileResult {
        TranspileResult::new(sql, self.params)
    }
}

impl ValueRenderer for ParamContext {
    fn render(&mut self, value: &str) -> String {
        self.add_param(value)
    }
}

/// Switches that change the generated SQL away from the plain form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Fold case with LOWER() on filters not marked case sensitive.
    pub honor_case_sensitivity: bool,
    /// Keep the WHERE filter when a CASE column is present.
    pub apply_filter_with_case: bool,
    /// Quote source, column and alias names for the dialect.
    pub quote_identifiers: bool,
}

impl BuildOptions {
    fn filter_builder(&self, dialect: Dialect) -> FilterExpressionBuilder {
        FilterExpressionBuilder::new()
            .dialect(dialect)
            .honor_case_sensitivity(self.honor_case_sensitivity)
            .quote_identifiers(self.quote_identifiers)
    }

    fn case_builder(&self, dialect: Dialect) -> CaseExpressionBuilder {
        CaseExpressionBuilder::new()
            .dialect(dialect)
            .quote_identifiers(self.quote_identifiers)
    }

    fn composer(&self, dialect: Dialect) -> QueryComposer {
        QueryComposer::new()
            .dialect(dialect)
            .apply_filter_with_case(self.apply_filter_with_case)
            .quote_identifiers(self.quote_identifiers)
    }
}

/// Build the full extract query with inline literals.
pub fn build_query(
    source: &str,
    filters: &[FilterSpec],
    rules: &[CaseRule],
    options: BuildOptions,
    dialect: Dialect,
) -> ExtractResult<String> {
    let filter = options.filter_builder(dialect).build(filters)?;
    let case = if rules.is_empty() {
        None
    } else {
        Some(options.case_builder(dialect).build(rules)?)
    };
    let sql = options.composer(dialect).compose(source, &filter, case.as_deref())?;
    debug!(%dialect, sql = %sql, "built extract query");
    Ok(sql)
}

/// Build the full extract query with bind placeholders.
///
/// Values are numbered in the order they appear in the SQL text. A filter
/// that the composer drops contributes no parameters.
pub fn build_query_parameterized(
    source: &str,
    filters: &[FilterSpec],
    rules: &[CaseRule],
    options: BuildOptions,
    dialect: Dialect,
) -> ExtractResult<TranspileResult> {
    let mut ctx = ParamContext::new(dialect);
    let filter = if rules.is_empty() || options.apply_filter_with_case {
        options.filter_builder(dialect).build_with(filters, &mut ctx)?
    } else {
        for spec in filters {
            spec.validate()?;
        }
        String::new()
    };
    let case = if rules.is_empty() {
        None
    } else {
        Some(options.case_builder(dialect).build_with(rules, &mut ctx)?)
    };
    let sql = options.composer(dialect).compose(source, &filter, case.as_deref())?;
    let result = ctx.finish(sql);
    debug!(
        %dialect,
        sql = %result.sql,
        params = result.params.len(),
        "built parameterized extract query"
    );
    Ok(result)
}
