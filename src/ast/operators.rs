use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ExtractError;

/// Comparison operators accepted by filters and rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Equal (=)
    #[serde(rename = "=")]
    Eq,
    /// Not equal (!=, <>)
    #[serde(rename = "!=", alias = "<>")]
    Ne,
    /// Substring match; the filter builder wraps the value in `%`
    #[serde(rename = "LIKE", alias = "like")]
    Like,
    /// Comma separated list membership
    #[serde(rename = "IN", alias = "in")]
    In,
    /// Inclusive range, needs a second value
    #[serde(rename = "BETWEEN", alias = "between")]
    Between,
    /// Less than (<)
    #[serde(rename = "<")]
    Lt,
    /// Less than or equal (<=)
    #[serde(rename = "<=")]
    Lte,
    /// Greater than (>)
    #[serde(rename = ">")]
    Gt,
    /// Greater than or equal (>=)
    #[serde(rename = ">=")]
    Gte,
}

impl Operator {
    /// All operators a filter may use, in the order the form offers them.
    pub const FILTER_OPERATORS: [Operator; 9] = [
        Operator::Eq,
        Operator::Ne,
        Operator::Like,
        Operator::In,
        Operator::Between,
        Operator::Lt,
        Operator::Lte,
        Operator::Gt,
        Operator::Gte,
    ];

    /// Operators a CASE rule may use.
    pub const RULE_OPERATORS: [Operator; 3] = [Operator::Eq, Operator::Ne, Operator::Like];

    /// SQL spelling of the operator.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Like => "LIKE",
            Operator::In => "IN",
            Operator::Between => "BETWEEN",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
        }
    }

    pub fn is_rule_operator(&self) -> bool {
        Self::RULE_OPERATORS.contains(self)
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for Operator {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "=" => Ok(Operator::Eq),
            "!=" | "<>" => Ok(Operator::Ne),
            "LIKE" => Ok(Operator::Like),
            "IN" => Ok(Operator::In),
            "BETWEEN" => Ok(Operator::Between),
            "<" => Ok(Operator::Lt),
            "<=" => Ok(Operator::Lte),
            ">" => Ok(Operator::Gt),
            ">=" => Ok(Operator::Gte),
            other => Err(ExtractError::Parse(format!("unknown operator '{}'", other))),
        }
    }
}

/// Logical operator joining a filter to the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Combinator {
    #[default]
    #[serde(rename = "AND", alias = "and")]
    And,
    #[serde(rename = "OR", alias = "or")]
    Or,
}

impl std::fmt::Display for Combinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Combinator::And => write!(f, "AND"),
            Combinator::Or => write!(f, "OR"),
        }
    }
}

impl FromStr for Combinator {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AND" => Ok(Combinator::And),
            "OR" => Ok(Combinator::Or),
            other => Err(ExtractError::Parse(format!("unknown combinator '{}'", other))),
        }
    }
}
