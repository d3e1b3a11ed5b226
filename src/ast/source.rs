use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ExtractError;

/// Kind of relation an extract reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SourceKind {
    #[default]
    #[serde(rename = "TABLE", alias = "table")]
    Table,
    #[serde(rename = "VIEW", alias = "view")]
    View,
}

impl SourceKind {
    /// Plural keyword, as in `SHOW TABLES`.
    pub fn plural(&self) -> &'static str {
        match self {
            SourceKind::Table => "TABLES",
            SourceKind::View => "VIEWS",
        }
    }

    /// `information_schema.tables.table_type` value for this kind.
    pub fn information_schema_type(&self) -> &'static str {
        match self {
            SourceKind::Table => "BASE TABLE",
            SourceKind::View => "VIEW",
        }
    }

    /// `sqlite_master.type` value for this kind.
    pub fn sqlite_type(&self) -> &'static str {
        match self {
            SourceKind::Table => "table",
            SourceKind::View => "view",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Table => write!(f, "TABLE"),
            SourceKind::View => write!(f, "VIEW"),
        }
    }
}

impl FromStr for SourceKind {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TABLE" | "TABLES" => Ok(SourceKind::Table),
            "VIEW" | "VIEWS" => Ok(SourceKind::View),
            other => Err(ExtractError::Parse(format!(
                "unknown source kind '{}', expected TABLE or VIEW",
                other
            ))),
        }
    }
}
