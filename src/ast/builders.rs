//! Shorthand constructors for filters and rules.
//!
//! # Example
//! ```
//! use extractkit::ast::builders::*;
//!
//! let filters = vec![gt("age", "30").or(), is_in("id", "1, 2, 3")];
//! let rule = when_eq("status", "active").then("Y").otherwise("N").alias("is_active");
//! # let _ = (filters, rule);
//! ```

use crate::ast::{CaseRule, FilterSpec, Operator};

// ==================== Filters ====================

/// column = value
pub fn eq(column: &str, value: &str) -> FilterSpec {
    FilterSpec::new(column, Operator::Eq, value)
}

/// column != value
pub fn ne(column: &str, value: &str) -> FilterSpec {
    FilterSpec::new(column, Operator::Ne, value)
}

/// column > value
pub fn gt(column: &str, value: &str) -> FilterSpec {
    FilterSpec::new(column, Operator::Gt, value)
}

/// column >= value
pub fn gte(column: &str, value: &str) -> FilterSpec {
    FilterSpec::new(column, Operator::Gte, value)
}

/// column < value
pub fn lt(column: &str, value: &str) -> FilterSpec {
    FilterSpec::new(column, Operator::Lt, value)
}

/// column <= value
pub fn lte(column: &str, value: &str) -> FilterSpec {
    FilterSpec::new(column, Operator::Lte, value)
}

/// column LIKE '%value%'
pub fn like(column: &str, value: &str) -> FilterSpec {
    FilterSpec::new(column, Operator::Like, value)
}

/// column IN (...) from a comma separated list
pub fn is_in(column: &str, items: &str) -> FilterSpec {
    FilterSpec::new(column, Operator::In, items)
}

/// column BETWEEN low AND high
pub fn between(column: &str, low: &str, high: &str) -> FilterSpec {
    FilterSpec::new(column, Operator::Between, low).upper(high)
}

// ==================== Rules ====================

/// Start a rule matching `column = value`.
pub fn when_eq(column: &str, value: &str) -> RuleBuilder {
    RuleBuilder::new(column, Operator::Eq, value)
}

/// Start a rule matching `column != value`.
pub fn when_ne(column: &str, value: &str) -> RuleBuilder {
    RuleBuilder::new(column, Operator::Ne, value)
}

/// Start a rule matching `column LIKE value`.
pub fn when_like(column: &str, pattern: &str) -> RuleBuilder {
    RuleBuilder::new(column, Operator::Like, pattern)
}

/// Builder for CASE rules
#[derive(Debug, Clone)]
pub struct RuleBuilder {
    column: String,
    op: Operator,
    value: String,
    then_value: String,
    else_value: Option<String>,
}

impl RuleBuilder {
    fn new(column: &str, op: Operator, value: &str) -> Self {
        Self {
            column: column.to_string(),
            op,
            value: value.to_string(),
            then_value: String::new(),
            else_value: None,
        }
    }

    pub fn then(mut self, value: &str) -> Self {
        self.then_value = value.to_string();
        self
    }

    pub fn otherwise(mut self, value: &str) -> Self {
        self.else_value = Some(value.to_string());
        self
    }

    /// Name the output column and finish the rule.
    pub fn alias(self, name: &str) -> CaseRule {
        CaseRule {
            column: self.column,
            op: self.op,
            value: self.value,
            then_value: self.then_value,
            else_value: self.else_value,
            alias: name.to_string(),
        }
    }
}
