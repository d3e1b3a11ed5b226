//! Catalog queries: listing sources and describing their columns.

use crate::ast::SourceKind;
use crate::error::ExtractResult;
use super::{Dialect, ParamContext, TranspileResult, validate_identifier};

const DEFAULT_PG_SCHEMA: &str = "public";

/// Query returning one name per row for every source of `kind`.
pub fn list_sources_query(
    dialect: Dialect,
    kind: SourceKind,
    schema: Option<&str>,
) -> TranspileResult {
    let mut ctx = ParamContext::new(dialect);
    let sql = match dialect {
        Dialect::Postgres => {
            let kind_param = ctx.add_param(kind.information_schema_type());
            let schema_param = ctx.add_param(schema.unwrap_or(DEFAULT_PG_SCHEMA));
            format!(
                "SELECT table_name::text FROM information_schema.tables \
                 WHERE table_type = {} AND table_schema = {} ORDER BY table_name",
                kind_param, schema_param
            )
        }
        Dialect::MySql => {
            let kind_param = ctx.add_param(kind.information_schema_type());
            let schema_sql = match schema {
                Some(schema) => ctx.add_param(schema),
                None => "DATABASE()".to_string(),
            };
            format!(
                "SELECT CAST(table_name AS CHAR) FROM information_schema.tables \
                 WHERE table_type = {} AND table_schema = {} ORDER BY table_name",
                kind_param, schema_sql
            )
        }
        Dialect::Sqlite => {
            let kind_param = ctx.add_param(kind.sqlite_type());
            format!(
                "SELECT name FROM sqlite_master \
                 WHERE type = {} AND name NOT LIKE 'sqlite_%' ORDER BY name",
                kind_param
            )
        }
    };
    ctx.finish(sql)
}

/// Query returning the column names of `source` in declaration order.
///
/// A qualified `schema.name` source overrides `schema`.
pub fn describe_columns_query(
    dialect: Dialect,
    source: &str,
    schema: Option<&str>,
) -> ExtractResult<TranspileResult> {
    validate_identifier(source)?;
    let (qualifier, name) = match source.rsplit_once('.') {
        Some((qualifier, name)) => (Some(qualifier.rsplit('.').next().unwrap_or(qualifier)), name),
        None => (schema, source),
    };

    let mut ctx = ParamContext::new(dialect);
    let sql = match dialect {
        Dialect::Postgres => {
            let schema_param = ctx.add_param(qualifier.unwrap_or(DEFAULT_PG_SCHEMA));
            let name_param = ctx.add_param(name);
            format!(
                "SELECT column_name::text FROM information_schema.columns \
                 WHERE table_schema = {} AND table_name = {} ORDER BY ordinal_position",
                schema_param, name_param
            )
        }
        Dialect::MySql => {
            let schema_sql = match qualifier {
                Some(schema) => ctx.add_param(schema),
                None => "DATABASE()".to_string(),
            };
            let name_param = ctx.add_param(name);
            format!(
                "SELECT CAST(column_name AS CHAR) FROM information_schema.columns \
                 WHERE table_schema = {} AND table_name = {} ORDER BY ordinal_position",
                schema_sql, name_param
            )
        }
        Dialect::Sqlite => {
            let name_param = ctx.add_param(name);
            format!("SELECT name FROM pragma_table_info({}) ORDER BY cid", name_param)
        }
    };
    Ok(ctx.finish(sql))
}
