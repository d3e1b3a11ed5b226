//! Database access behind a small trait, so extract actions can be driven
//! against any backend (or a test double).

mod sql;
mod table;

pub use self::sql::{DbPool, SqlGateway};
pub use self::table::TabularResult;

use crate::ast::SourceKind;
use crate::error::ExtractResult;
use crate::transpiler::{Dialect, TranspileResult};

/// Operations the extract form needs from a database.
#[allow(async_fn_in_trait)]
pub trait Gateway {
    /// Dialect to generate SQL for.
    fn dialect(&self) -> Dialect;

    /// Names of all tables or views visible to the connection.
    async fn list_sources(&self, kind: SourceKind) -> ExtractResult<Vec<String>>;

    /// Column names of a source, in declaration order.
    async fn describe_columns(&self, kind: SourceKind, source: &str) -> ExtractResult<Vec<String>>;

    /// Run a query built with inline literals.
    async fn execute(&self, sql: &str) -> ExtractResult<TabularResult>;

    /// Run a query with bound parameters.
    async fn execute_parameterized(&self, query: &TranspileResult) -> ExtractResult<TabularResult>;

    /// Create or replace view `name` over `select_sql`.
    async fn create_view(&self, name: &str, select_sql: &str) -> ExtractResult<()>;

    /// Insert rows one by one, returning how many went in.
    async fn bulk_insert(&self, table: &str, rows: &[Vec<Option<String>>]) -> ExtractResult<u64>;
}
