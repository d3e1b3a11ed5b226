//! Statements that change the database: saved views and row inserts.

use uuid::Uuid;

use crate::error::{ExtractError, ExtractResult};
use super::{Dialect, validate_identifier};

const VIEW_SUFFIX_LEN: usize = 6;

/// `<name>_<6 hex chars>`, unique enough for repeated saves of one config.
pub fn view_name(config_name: &str) -> ExtractResult<String> {
    let config_name = config_name.trim();
    if config_name.is_empty() {
        return Err(ExtractError::Config("a configuration name is required".to_string()));
    }
    let id = Uuid::new_v4().simple().to_string();
    let name = format!("{}_{}", config_name, &id[..VIEW_SUFFIX_LEN]);
    validate_identifier(&name)?;
    Ok(name)
}

/// Statements that (re)create view `name` over `select_sql`, in order.
pub fn create_view_statements(
    dialect: Dialect,
    name: &str,
    select_sql: &str,
) -> ExtractResult<Vec<String>> {
    validate_identifier(name)?;
    let statements = if dialect.supports_create_or_replace_view() {
        vec![format!("CREATE OR REPLACE VIEW {} AS {}", name, select_sql)]
    } else {
        vec![
            format!("DROP VIEW IF EXISTS {}", name),
            format!("CREATE VIEW {} AS {}", name, select_sql),
        ]
    };
    Ok(statements)
}

/// One `INSERT INTO table VALUES (...)` for a row of text cells.
///
/// `None` cells become NULL; everything else is a quoted literal and left to
/// the database to coerce into the column type.
pub fn insert_row_sql(
    dialect: Dialect,
    table: &str,
    row: &[Option<String>],
) -> ExtractResult<String> {
    validate_identifier(table)?;
    if row.is_empty() {
        return Err(ExtractError::Csv(format!("empty row for table {}", table)));
    }
    let values: Vec<String> = row
        .iter()
        .map(|cell| match cell {
            Some(v) => dialect.quote_literal(v),
            None => "NULL".to_string(),
        })
        .collect();
    Ok(format!("INSERT INTO {} VALUES ({})", table, values.join(", ")))
}
