use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

const NULL_TEXT: &str = "NULL";

/// Rows returned by a query, rendered as text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TabularResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl TabularResult {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one named column.
    pub fn column(&self, name: &str) -> Option<Vec<Option<&str>>> {
        let index = self.columns.iter().position(|c| c == name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(index).and_then(|cell| cell.as_deref()))
                .collect(),
        )
    }

    /// Rows as JSON objects keyed by column name.
    pub fn to_json(&self) -> Value {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let object: Map<String, Value> = self
                    .columns
                    .iter()
                    .zip(row)
                    .map(|(name, cell)| {
                        let value = cell.clone().map(Value::String).unwrap_or(Value::Null);
                        (name.clone(), value)
                    })
                    .collect();
                Value::Object(object)
            })
            .collect();
        Value::Array(rows)
    }
}

impl fmt::Display for TabularResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.as_deref().unwrap_or(NULL_TEXT).chars().count();
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(len),
                    None => widths.push(len),
                }
            }
        }

        if !self.columns.is_empty() {
            let header: Vec<String> = self
                .columns
                .iter()
                .zip(&widths)
                .map(|(c, w)| format!("{:<width$}", c, width = *w))
                .collect();
            writeln!(f, "{}", header.join(" | ").trim_end())?;
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            writeln!(f, "{}", rule.join("-+-"))?;
        }
        for row in &self.rows {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, w)| {
                    format!("{:<width$}", cell.as_deref().unwrap_or(NULL_TEXT), width = *w)
                })
                .collect();
            writeln!(f, "{}", cells.join(" | ").trim_end())?;
        }
        let noun = if self.rows.len() == 1 { "row" } else { "rows" };
        write!(f, "({} {})", self.rows.len(), noun)
    }
}
