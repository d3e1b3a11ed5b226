//! Derived column from CASE rules.

use crate::ast::CaseRule;
use crate::error::{ExtractError, ExtractResult};
use super::{Dialect, Inline, ValueRenderer, render_identifier};

/// Builds `CASE WHEN ... END AS alias`.
///
/// Each rule becomes one `WHEN` line. A non-empty ELSE is appended to the
/// rule's own line rather than closing the block. Only the first rule's
/// alias names the column.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseExpressionBuilder {
    dialect: Dialect,
    quote_identifiers: bool,
}

impl CaseExpressionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn quote_identifiers(mut self, yes: bool) -> Self {
        self.quote_identifiers = yes;
        self
    }

    pub fn build(&self, rules: &[CaseRule]) -> ExtractResult<String> {
        self.build_with(rules, &mut Inline(self.dialect))
    }

    pub fn build_with<R: ValueRenderer>(
        &self,
        rules: &[CaseRule],
        out: &mut R,
    ) -> ExtractResult<String> {
        let first = rules.first().ok_or(ExtractError::EmptyRuleSet)?;
        let alias = render_identifier(&first.alias, self.dialect, self.quote_identifiers)?;

        let mut lines = Vec::with_capacity(rules.len() + 2);
        lines.push("CASE".to_string());
        for rule in rules {
            rule.validate()?;
            let column = render_identifier(&rule.column, self.dialect, self.quote_identifiers)?;
            let value = out.render(&rule.value);
            let then_value = out.render(&rule.then_value);
            let mut line = format!("WHEN {} {} {} THEN {}", column, rule.op, value, then_value);
            if let Some(else_value) = rule.else_value() {
                line.push_str(" ELSE ");
                line.push_str(&out.render(else_value));
            }
            lines.push(line);
        }
        lines.push(format!("END AS {}", alias));
        Ok(lines.join("\n"))
    }
}

/// Build a CASE expression with default options.
pub fn build_case_when(rules: &[CaseRule]) -> ExtractResult<String> {
    CaseExpressionBuilder::new().build(rules)
}
