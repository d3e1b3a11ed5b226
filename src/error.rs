//! Error types for extract building and execution.

use thiserror::Error;

use crate::ast::Operator;

/// Errors raised while building, parsing, or executing an extract.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Connection or statement failure reported by the database.
    #[error("database error: {message}")]
    Database { message: String },

    /// A CASE expression was requested with no rules.
    #[error("a CASE expression needs at least one rule")]
    EmptyRuleSet,

    /// A filter value is missing or unusable for its operator.
    #[error("malformed value for filter on '{column}': {reason}")]
    MalformedFilterValue { column: String, reason: String },

    /// The operator is not allowed in this position.
    #[error("operator {op} is not supported in {context}")]
    UnsupportedOperator { op: Operator, context: &'static str },

    /// A table, view, column, or alias name failed the identifier allow-list.
    #[error("invalid identifier: '{0}'")]
    InvalidIdentifier(String),

    /// Filter or rule text could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Settings or extract configuration problem.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("csv error: {0}")]
    Csv(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type ExtractResult<T> = Result<T, ExtractError>;

impl ExtractError {
    pub fn database(message: impl Into<String>) -> Self {
        ExtractError::Database { message: message.into() }
    }

    pub(crate) fn malformed(column: &str, reason: impl Into<String>) -> Self {
        ExtractError::MalformedFilterValue {
            column: column.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<sqlx::Error> for ExtractError {
    fn from(err: sqlx::Error) -> Self {
        ExtractError::database(err.to_string())
    }
}

impl From<csv::Error> for ExtractError {
    fn from(err: csv::Error) -> Self {
        ExtractError::Csv(err.to_string())
    }
}

impl From<toml::de::Error> for ExtractError {
    fn from(err: toml::de::Error) -> Self {
        ExtractError::Config(err.to_string())
    }
}
