use serde::{Deserialize, Serialize};

use crate::ast::{Combinator, Operator};
use crate::error::{ExtractError, ExtractResult};
use crate::transpiler::validate_identifier;

/// One filter row of the extract form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Column the comparison applies to
    pub column: String,
    /// Comparison operator
    pub op: Operator,
    /// Primary value; a comma separated list for IN
    pub value: String,
    /// Upper bound, only meaningful for BETWEEN
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value2: Option<String>,
    /// How this filter joins the next one (unused on the last filter)
    #[serde(default)]
    pub combinator: Combinator,
    /// Whether the comparison should respect case
    #[serde(default)]
    pub case_sensitive: bool,
}

impl FilterSpec {
    pub fn new(column: impl Into<String>, op: Operator, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            op,
            value: value.into(),
            value2: None,
            combinator: Combinator::And,
            case_sensitive: false,
        }
    }

    /// Set the upper bound used by BETWEEN.
    pub fn upper(mut self, value2: impl Into<String>) -> Self {
        self.value2 = Some(value2.into());
        self
    }

    /// Join the next filter with OR.
    pub fn or(mut self) -> Self {
        self.combinator = Combinator::Or;
        self
    }

    /// Join the next filter with AND.
    pub fn and(mut self) -> Self {
        self.combinator = Combinator::And;
        self
    }

    pub fn case_sensitive(mut self, yes: bool) -> Self {
        self.case_sensitive = yes;
        self
    }

    /// Items of an IN list: split on commas and trimmed.
    pub fn in_items(&self) -> Vec<&str> {
        self.value.split(',').map(str::trim).collect()
    }

    /// Check the filter is complete enough to render.
    pub fn validate(&self) -> ExtractResult<()> {
        validate_identifier(&self.column)?;
        match self.op {
            Operator::Between => {
                let upper = self.value2.as_deref().map(str::trim).unwrap_or_default();
                if upper.is_empty() {
                    return Err(ExtractError::malformed(
                        &self.column,
                        "BETWEEN needs a second value",
                    ));
                }
            }
            Operator::In => {
                if self.in_items().iter().all(|item| item.is_empty()) {
                    return Err(ExtractError::malformed(
                        &self.column,
                        "IN needs at least one value",
                    ));
                }
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_between_without_upper_is_malformed() {
        let spec = FilterSpec::new("created", Operator::Between, "2024-01-01");
        assert!(matches!(
            spec.validate(),
            Err(ExtractError::MalformedFilterValue { .. })
        ));

        let blank = spec.clone().upper("  ");
        assert!(blank.validate().is_err());
        assert!(spec.upper("2024-12-31").validate().is_ok());
    }

    #[test]
    fn test_empty_in_list_is_malformed() {
        let spec = FilterSpec::new("id", Operator::In, " , ");
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_in_items_are_trimmed() {
        let spec = FilterSpec::new("id", Operator::In, "1, 2,3 ");
        assert_eq!(spec.in_items(), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_bad_column_rejected() {
        let spec = FilterSpec::new("age; DROP TABLE users", Operator::Gt, "30");
        assert!(matches!(
            spec.validate(),
            Err(ExtractError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn test_deserialize_from_toml() {
        let spec: FilterSpec = toml::from_str(
            r#"
            column = "age"
            op = ">="
            value = "30"
            combinator = "OR"
            "#,
        )
        .unwrap();
        assert_eq!(spec.op, Operator::Gte);
        assert_eq!(spec.combinator, Combinator::Or);
        assert!(!spec.case_sensitive);
        assert_eq!(spec.value2, None);
    }
}
