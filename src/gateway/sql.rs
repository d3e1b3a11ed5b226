//! [`Gateway`] over a typed sqlx pool per backend (Postgres, MySQL, SQLite).

use sqlx::mysql::{MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::types::chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sqlx::types::{Decimal, JsonValue, Uuid};
use sqlx::{Column, Executor, Row, TypeInfo, ValueRef};
use tracing::{debug, info};

use crate::ast::SourceKind;
use crate::error::{ExtractError, ExtractResult};
use crate::transpiler::catalog::{describe_columns_query, list_sources_query};
use crate::transpiler::ddl::{create_view_statements, insert_row_sql};
use crate::transpiler::{Dialect, TranspileResult};
use super::{Gateway, TabularResult};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Connection pool for one of the supported backends.
#[derive(Debug, Clone)]
pub enum DbPool {
    Postgres(PgPool),
    MySql(MySqlPool),
    Sqlite(SqlitePool),
}

impl DbPool {
    pub fn dialect(&self) -> Dialect {
        match self {
            DbPool::Postgres(_) => Dialect::Postgres,
            DbPool::MySql(_) => Dialect::MySql,
            DbPool::Sqlite(_) => Dialect::Sqlite,
        }
    }
}

/// Run `$body` with `$pool` bound to the backend's typed pool.
macro_rules! with_pool {
    ($db:expr, $pool:ident => $body:expr) => {
        match $db {
            DbPool::Postgres($pool) => $body,
            DbPool::MySql($pool) => $body,
            DbPool::Sqlite($pool) => $body,
        }
    };
}

pub struct SqlGateway {
    pool: DbPool,
    schema: Option<String>,
}

impl SqlGateway {
    /// Connect to `url`. The backend is taken from the URL scheme.
    pub async fn connect(url: &str, schema: Option<String>) -> ExtractResult<Self> {
        let dialect = Dialect::from_url(url)?;
        let pool = match dialect {
            Dialect::Postgres => DbPool::Postgres(
                PgPoolOptions::new()
                    .max_connections(DEFAULT_MAX_CONNECTIONS)
                    .connect(url)
                    .await?,
            ),
            Dialect::MySql => DbPool::MySql(
                MySqlPoolOptions::new()
                    .max_connections(DEFAULT_MAX_CONNECTIONS)
                    .connect(url)
                    .await?,
            ),
            // An in-memory SQLite database lives and dies with its connection.
            Dialect::Sqlite => DbPool::Sqlite(
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .connect(url)
                    .await?,
            ),
        };
        info!(%dialect, "connected to database");
        Ok(Self::from_pool(pool, schema))
    }

    pub fn from_pool(pool: DbPool, schema: Option<String>) -> Self {
        Self { pool, schema }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Execute a statement that returns no rows.
    pub async fn run_statement(&self, sql: &str) -> ExtractResult<u64> {
        debug!(sql = %sql, "executing statement");
        let affected = with_pool!(&self.pool, pool => {
            sqlx::query(sql).execute(pool).await?.rows_affected()
        });
        Ok(affected)
    }

    async fn fetch_table(&self, query: &TranspileResult) -> ExtractResult<TabularResult> {
        debug!(sql = %query.sql, params = query.params.len(), "executing");
        with_pool!(&self.pool, pool => {
            let mut q = sqlx::query(&query.sql);
            for param in &query.params {
                q = q.bind(param.as_str());
            }
            let rows = q.fetch_all(pool).await?;
            let columns = match rows.first() {
                Some(row) => column_names(row.columns()),
                // No row to read names from; ask the statement instead.
                None => match pool.describe(&query.sql).await {
                    Ok(described) => column_names(described.columns()),
                    Err(e) => {
                        debug!(error = %e, "could not describe empty result");
                        Vec::new()
                    }
                },
            };
            Ok(to_tabular(&rows, columns))
        })
    }

    async fn fetch_names(&self, query: &TranspileResult) -> ExtractResult<Vec<String>> {
        let table = self.fetch_table(query).await?;
        Ok(table
            .rows
            .into_iter()
            .filter_map(|row| row.into_iter().next().flatten())
            .collect())
    }
}

impl Gateway for SqlGateway {
    fn dialect(&self) -> Dialect {
        self.pool.dialect()
    }

    async fn list_sources(&self, kind: SourceKind) -> ExtractResult<Vec<String>> {
        let query = list_sources_query(self.dialect(), kind, self.schema.as_deref());
        self.fetch_names(&query).await
    }

    async fn describe_columns(&self, kind: SourceKind, source: &str) -> ExtractResult<Vec<String>> {
        let query = describe_columns_query(self.dialect(), source, self.schema.as_deref())?;
        let columns = self.fetch_names(&query).await?;
        if columns.is_empty() {
            return Err(ExtractError::database(format!("{} {} not found", kind, source)));
        }
        Ok(columns)
    }

    async fn execute(&self, sql: &str) -> ExtractResult<TabularResult> {
        self.fetch_table(&TranspileResult::sql_only(sql)).await
    }

    async fn execute_parameterized(&self, query: &TranspileResult) -> ExtractResult<TabularResult> {
        self.fetch_table(query).await
    }

    async fn create_view(&self, name: &str, select_sql: &str) -> ExtractResult<()> {
        for statement in create_view_statements(self.dialect(), name, select_sql)? {
            self.run_statement(&statement).await?;
        }
        info!(view = name, "view created");
        Ok(())
    }

    async fn bulk_insert(&self, table: &str, rows: &[Vec<Option<String>>]) -> ExtractResult<u64> {
        let mut inserted = 0u64;
        for (index, row) in rows.iter().enumerate() {
            let sql = insert_row_sql(self.dialect(), table, row)?;
            self.run_statement(&sql).await.map_err(|e| match e {
                ExtractError::Database { message } => {
                    ExtractError::database(format!("row {}: {}", index + 1, message))
                }
                other => other,
            })?;
            inserted += 1;
        }
        info!(table, rows = inserted, "rows inserted");
        Ok(inserted)
    }
}

fn column_names<C: Column>(columns: &[C]) -> Vec<String> {
    columns.iter().map(|c| c.name().to_string()).collect()
}

fn to_tabular<R: CellText>(rows: &[R], columns: Vec<String>) -> TabularResult {
    let rows = rows
        .iter()
        .map(|row| (0..row.len()).map(|i| row.cell_text(i)).collect())
        .collect();
    TabularResult { columns, rows }
}

/// Render one cell of a backend row as text.
trait CellText: Row {
    fn cell_text(&self, index: usize) -> Option<String>;
}

/// Try each listed type in order; the first one the driver accepts for
/// the column wins. Blobs are read lossily as UTF-8, anything else left
/// over prints as `<TYPE>`.
macro_rules! cell_text {
    ($row:expr, $index:expr, [$($ty:ty),+ $(,)?]) => {{
        $(
            if let Ok(value) = $row.try_get::<Option<$ty>, _>($index) {
                return value.map(|v| v.to_string());
            }
        )+
        if let Ok(value) = $row.try_get::<Option<Vec<u8>>, _>($index) {
            return value.map(|bytes| String::from_utf8_lossy(&bytes).into_owned());
        }
        $row.try_get_raw($index)
            .ok()
            .filter(|raw| !raw.is_null())
            .map(|raw| format!("<{}>", raw.type_info().name()))
    }};
}

impl CellText for PgRow {
    fn cell_text(&self, index: usize) -> Option<String> {
        cell_text!(self, index, [
            String,
            i16,
            i32,
            i64,
            f32,
            f64,
            bool,
            Decimal,
            NaiveDate,
            NaiveTime,
            NaiveDateTime,
            DateTime<Utc>,
            Uuid,
            JsonValue,
        ])
    }
}

impl CellText for MySqlRow {
    fn cell_text(&self, index: usize) -> Option<String> {
        cell_text!(self, index, [
            String,
            i64,
            u64,
            f32,
            f64,
            bool,
            Decimal,
            NaiveDate,
            NaiveTime,
            NaiveDateTime,
            DateTime<Utc>,
            JsonValue,
        ])
    }
}

// SQLite checks each value's storage class, not the declared column type,
// so DATE and NUMERIC columns come back as TEXT, INTEGER or REAL.
impl CellText for SqliteRow {
    fn cell_text(&self, index: usize) -> Option<String> {
        cell_text!(self, index, [String, i64, f64])
    }
}
