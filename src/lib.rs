//! # extractkit
//!
//! Build an extract over a SQL table or view: filters become a WHERE
//! expression, rules become a derived CASE column, and the composed query can
//! be previewed, executed, saved as a view, or fed with CSV rows.
//!
//! ```
//! use extractkit::ast::builders::*;
//! use extractkit::transpiler::{build_filter_sql, build_case_when, QueryComposer};
//!
//! let filter = build_filter_sql(&[gt("age", "30"), is_in("id", "1, 2,3")]).unwrap();
//! assert_eq!(filter, "age > '30' AND id IN ('1', '2', '3')");
//!
//! let rule = when_eq("status", "active").then("Y").otherwise("N").alias("is_active");
//! let case = build_case_when(&[rule]).unwrap();
//! let sql = QueryComposer::new().compose("people", &filter, Some(case.as_str())).unwrap();
//! assert!(sql.starts_with("WITH base AS (SELECT * FROM people)"));
//! ```

pub mod actions;
pub mod ast;
pub mod config;
pub mod error;
pub mod extract;
pub mod gateway;
pub mod parser;
pub mod transpiler;
pub mod upload;

pub use error::{ExtractError, ExtractResult};
pub use extract::ExtractConfig;
pub use parser::{extend_filters, parse_filter, parse_filters, parse_rule};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::actions::{insert_upload, run_extract, save_extract, SavedView};
    pub use crate::ast::builders::*;
    pub use crate::ast::{CaseRule, Combinator, FilterSpec, Operator, SourceKind};
    pub use crate::error::{ExtractError, ExtractResult};
    pub use crate::extract::ExtractConfig;
    pub use crate::gateway::{Gateway, SqlGateway, TabularResult};
    pub use crate::transpiler::{
        BuildOptions, CaseExpressionBuilder, Dialect, FilterExpressionBuilder, QueryComposer,
        TranspileResult, build_query, build_query_parameterized,
    };
    pub use crate::parser::{parse_filters, parse_rule};
}
