//! SQL dialects the extract builder targets.

use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, ExtractResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Postgres,
    MySql,
    Sqlite,
}

impl Dialect {
    /// Pick the dialect from a connection URL scheme.
    pub fn from_url(url: &str) -> ExtractResult<Self> {
        let scheme = url
            .split_once(':')
            .map(|(scheme, _)| scheme.to_ascii_lowercase())
            .unwrap_or_default();
        match scheme.as_str() {
            "postgres" | "postgresql" => Ok(Dialect::Postgres),
            "mysql" | "mariadb" => Ok(Dialect::MySql),
            "sqlite" => Ok(Dialect::Sqlite),
            _ => Err(ExtractError::Config(format!(
                "unsupported database scheme in '{}'",
                url
            ))),
        }
    }

    /// Bind placeholder for the 1-based parameter `index`.
    pub fn placeholder(&self, index: usize) -> String {
        match self {
            Dialect::Postgres => format!("${}", index),
            Dialect::MySql | Dialect::Sqlite => "?".to_string(),
        }
    }

    /// Render a string literal. Single quotes are doubled; MySQL also
    /// treats backslash as an escape character, so those are doubled too.
    pub fn quote_literal(&self, value: &str) -> String {
        let escaped = value.replace('\'', "''");
        match self {
            Dialect::MySql => format!("'{}'", escaped.replace('\\', "\\\\")),
            Dialect::Postgres | Dialect::Sqlite => format!("'{}'", escaped),
        }
    }

    /// Quote one identifier part: backticks on MySQL, double quotes
    /// elsewhere. An embedded quote character is doubled.
    pub fn quote_identifier(&self, part: &str) -> String {
        match self {
            Dialect::MySql => format!("`{}`", part.replace('`', "``")),
            Dialect::Postgres | Dialect::Sqlite => format!("\"{}\"", part.replace('"', "\"\"")),
        }
    }

    /// Whether `CREATE OR REPLACE VIEW` is available.
    pub fn supports_create_or_replace_view(&self) -> bool {
        !matches!(self, Dialect::Sqlite)
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::Postgres => write!(f, "postgres"),
            Dialect::MySql => write!(f, "mysql"),
            Dialect::Sqlite => write!(f, "sqlite"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_from_url() {
        assert_eq!(Dialect::from_url("postgres://u@localhost/db").unwrap(), Dialect::Postgres);
        assert_eq!(Dialect::from_url("mariadb://localhost/db").unwrap(), Dialect::MySql);
        assert_eq!(Dialect::from_url("sqlite::memory:").unwrap(), Dialect::Sqlite);
        assert!(Dialect::from_url("snowflake://acct").is_err());
        assert!(Dialect::from_url("no-scheme").is_err());
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(Dialect::Postgres.placeholder(3), "$3");
        assert_eq!(Dialect::MySql.placeholder(3), "?");
        assert_eq!(Dialect::Sqlite.placeholder(1), "?");
    }

    #[test]
    fn test_quote_literal_escapes() {
        assert_eq!(Dialect::Postgres.quote_literal("O'Brien"), "'O''Brien'");
        assert_eq!(Dialect::Sqlite.quote_literal(r"a\b"), r"'a\b'");
        assert_eq!(Dialect::MySql.quote_literal(r"a\'b"), r"'a\\''b'");
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(Dialect::Postgres.quote_identifier("CustomerId"), "\"CustomerId\"");
        assert_eq!(Dialect::Sqlite.quote_identifier("a\"b"), "\"a\"\"b\"");
        assert_eq!(Dialect::MySql.quote_identifier("CustomerId"), "`CustomerId`");
    }
}
