use serde::{Deserialize, Serialize};

use crate::ast::Operator;
use crate::error::{ExtractError, ExtractResult};
use crate::transpiler::validate_identifier;

/// One WHEN/THEN branch of the derived column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRule {
    pub column: String,
    /// One of `=`, `!=`, `LIKE`
    pub op: Operator,
    pub value: String,
    #[serde(rename = "then")]
    pub then_value: String,
    #[serde(rename = "else", default, skip_serializing_if = "Option::is_none")]
    pub else_value: Option<String>,
    /// Output column name; only the first rule's alias is used
    pub alias: String,
}

impl CaseRule {
    /// The ELSE value, if one was given and is not blank.
    pub fn else_value(&self) -> Option<&str> {
        self.else_value.as_deref().filter(|v| !v.is_empty())
    }

    pub fn validate(&self) -> ExtractResult<()> {
        validate_identifier(&self.column)?;
        if !self.op.is_rule_operator() {
            return Err(ExtractError::UnsupportedOperator {
                op: self.op,
                context: "a CASE rule",
            });
        }
        Ok(())
    }
}
