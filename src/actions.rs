//! What the form's buttons do: run a preview, save as a view, insert an
//! upload. Each action takes the gateway explicitly.

use serde::Serialize;
use tracing::info;

use crate::ast::SourceKind;
use crate::error::{ExtractError, ExtractResult};
use crate::extract::ExtractConfig;
use crate::gateway::{Gateway, TabularResult};
use crate::transpiler::BuildOptions;
use crate::transpiler::ddl::view_name;
use crate::upload::Upload;

/// A view created from an extract configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedView {
    pub name: String,
    pub sql: String,
}

/// Execute the extract and return the query text with its rows.
///
/// With `bind` the values travel as bound parameters instead of inline
/// literals.
pub async fn run_extract<G: Gateway>(
    gateway: &G,
    config: &ExtractConfig,
    options: BuildOptions,
    bind: bool,
) -> ExtractResult<(String, TabularResult)> {
    let dialect = gateway.dialect();
    if bind {
        let query = config.to_sql_parameterized(options, dialect)?;
        let rows = gateway.execute_parameterized(&query).await?;
        Ok((query.sql, rows))
    } else {
        let sql = config.to_sql(options, dialect)?;
        let rows = gateway.execute(&sql).await?;
        Ok((sql, rows))
    }
}

/// Save the extract as `<name>_<suffix>`. `name` overrides the config's own.
pub async fn save_extract<G: Gateway>(
    gateway: &G,
    config: &ExtractConfig,
    name: Option<&str>,
    options: BuildOptions,
) -> ExtractResult<SavedView> {
    let base = name
        .or(config.name.as_deref())
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| ExtractError::Config("enter a configuration name".to_string()))?;
    let sql = config.to_sql(options, gateway.dialect())?;
    let name = view_name(base)?;
    gateway.create_view(&name, &sql).await?;
    info!(view = %name, source = %config.source, "extract saved");
    Ok(SavedView { name, sql })
}

/// Insert every upload row into `table` after checking the column count.
pub async fn insert_upload<G: Gateway>(
    gateway: &G,
    table: &str,
    upload: &Upload,
) -> ExtractResult<u64> {
    let columns = gateway.describe_columns(SourceKind::Table, table).await?;
    if columns.len() != upload.width() {
        return Err(ExtractError::Csv(format!(
            "file has {} columns but {} has {}",
            upload.width(),
            table,
            columns.len()
        )));
    }
    gateway.bulk_insert(table, &upload.rows).await
}
