//! Extract configuration: the saved state of the extract form.
//!
//! ```toml
//! name = "big_orders"
//! kind = "TABLE"
//! source = "orders"
//!
//! [[filters]]
//! column = "total"
//! op = ">"
//! value = "100"
//!
//! [[rules]]
//! column = "status"
//! op = "="
//! value = "open"
//! then = "Y"
//! else = "N"
//! alias = "is_open"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ast::{CaseRule, FilterSpec, SourceKind};
use crate::error::{ExtractError, ExtractResult};
use crate::transpiler::{
    BuildOptions, Dialect, TranspileResult, build_query, build_query_parameterized,
    validate_identifier,
};

/// Upper bound on filters, matching the form's filter count widget.
pub const MAX_FILTERS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Configuration name, used as the saved view's prefix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub kind: SourceKind,
    pub source: String,
    #[serde(default)]
    pub filters: Vec<FilterSpec>,
    #[serde(default)]
    pub rules: Vec<CaseRule>,
}

impl ExtractConfig {
    pub fn new(kind: SourceKind, source: impl Into<String>) -> Self {
        Self {
            name: None,
            kind,
            source: source.into(),
            filters: Vec::new(),
            rules: Vec::new(),
        }
    }

    pub fn from_toml(text: &str) -> ExtractResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> ExtractResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ExtractError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&text)
    }

    pub fn to_toml(&self) -> ExtractResult<String> {
        toml::to_string_pretty(self).map_err(|e| ExtractError::Config(e.to_string()))
    }

    /// Check source and filter count; filter and rule contents are checked
    /// when the query is built.
    pub fn validate(&self) -> ExtractResult<()> {
        validate_identifier(&self.source)?;
        if self.filters.len() > MAX_FILTERS {
            return Err(ExtractError::Config(format!(
                "{} filters given, at most {} are allowed",
                self.filters.len(),
                MAX_FILTERS
            )));
        }
        Ok(())
    }

    /// The query to preview and save, with inline literals.
    pub fn to_sql(&self, options: BuildOptions, dialect: Dialect) -> ExtractResult<String> {
        self.validate()?;
        build_query(&self.source, &self.filters, &self.rules, options, dialect)
    }

    /// The same query with bind placeholders.
    pub fn to_sql_parameterized(
        &self,
        options: BuildOptions,
        dialect: Dialect,
    ) -> ExtractResult<TranspileResult> {
        self.validate()?;
        build_query_parameterized(&self.source, &self.filters, &self.rules, options, dialect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builders::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"
        name = "big_orders"
        kind = "TABLE"
        source = "orders"

        [[filters]]
        column = "total"
        op = ">"
        value = "100"
        combinator = "OR"

        [[filters]]
        column = "id"
        op = "IN"
        value = "1, 2,3"

        [[rules]]
        column = "status"
        op = "="
        value = "open"
        then = "Y"
        else = "N"
        alias = "is_open"
    "#;

    #[test]
    fn test_load_sample() {
        let config = ExtractConfig::from_toml(SAMPLE).unwrap();
        assert_eq!(config.name.as_deref(), Some("big_orders"));
        assert_eq!(config.kind, SourceKind::Table);
        assert_eq!(config.filters.len(), 2);
        assert_eq!(config.rules.len(), 1);
    }

    #[test]
    fn test_sql_without_rules() {
        let mut config = ExtractConfig::from_toml(SAMPLE).unwrap();
        config.rules.clear();
        assert_eq!(
            config.to_sql(BuildOptions::default(), Dialect::Postgres).unwrap(),
            "SELECT * FROM orders WHERE total > '100' OR id IN ('1', '2', '3')"
        );
    }

    #[test]
    fn test_too_many_filters() {
        let mut config = ExtractConfig::new(SourceKind::Table, "orders");
        config.filters = (0..6).map(|i| eq("id", &i.to_string())).collect();
        assert!(matches!(config.validate(), Err(ExtractError::Config(_))));
        config.filters.truncate(MAX_FILTERS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_source_rejected_on_load() {
        let text = "source = \"orders o; --\"";
        assert!(matches!(
            ExtractConfig::from_toml(text),
            Err(ExtractError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn test_toml_round_trip_keeps_form_state() {
        let config = ExtractConfig::from_toml(SAMPLE).unwrap();
        let again = ExtractConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, again);
    }
}
