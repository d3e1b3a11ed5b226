use pretty_assertions::assert_eq;

use crate::ast::builders::*;
use crate::error::ExtractError;
use crate::transpiler::{
    BuildOptions, Dialect, QueryComposer, build_query, build_query_parameterized,
};

#[test]
fn test_select_with_where() {
    let sql = QueryComposer::new().compose("orders", "id > '5'", None).unwrap();
    assert_eq!(sql, "SELECT * FROM orders WHERE id > '5'");
}

#[test]
fn test_select_without_filter() {
    let sql = QueryComposer::new().compose("orders", "", None).unwrap();
    assert_eq!(sql, "SELECT * FROM orders");
}

#[test]
fn test_case_drops_filter() {
    let sql = QueryComposer::new()
        .compose("orders", "id > '5'", Some("CASE...END AS x"))
        .unwrap();
    assert_eq!(
        sql,
        "WITH base AS (SELECT * FROM orders) SELECT *, CASE...END AS x FROM base"
    );
    assert!(!sql.contains("WHERE"));
}

#[test]
fn test_empty_case_counts_as_absent() {
    let sql = QueryComposer::new().compose("orders", "id > '5'", Some("  ")).unwrap();
    assert_eq!(sql, "SELECT * FROM orders WHERE id > '5'");
}

#[test]
fn test_filter_kept_with_case_when_opted_in() {
    let sql = QueryComposer::new()
        .apply_filter_with_case(true)
        .compose("orders", "id > '5'", Some("CASE...END AS x"))
        .unwrap();
    assert_eq!(
        sql,
        "WITH base AS (SELECT * FROM orders WHERE id > '5') SELECT *, CASE...END AS x FROM base"
    );
}

#[test]
fn test_source_must_be_identifier() {
    assert!(matches!(
        QueryComposer::new().compose("orders; DROP TABLE orders", "", None),
        Err(ExtractError::InvalidIdentifier(_))
    ));
    assert!(QueryComposer::new().compose("DB.SCHEMA.ORDERS", "", None).is_ok());
}

#[test]
fn test_build_query_end_to_end() {
    let options = BuildOptions::default();
    let filters = vec![gt("total", "100").or(), eq("status", "open")];
    let sql = build_query("orders", &filters, &[], options, Dialect::Postgres).unwrap();
    assert_eq!(sql, "SELECT * FROM orders WHERE total > '100' OR status = 'open'");

    let rules = vec![when_eq("status", "open").then("Y").otherwise("N").alias("is_open")];
    let sql = build_query("orders", &filters, &rules, options, Dialect::Postgres).unwrap();
    assert_eq!(
        sql,
        "WITH base AS (SELECT * FROM orders) SELECT *, CASE\n\
         WHEN status = 'open' THEN 'Y' ELSE 'N'\nEND AS is_open FROM base"
    );
}

#[test]
fn test_build_query_still_validates_dropped_filters() {
    let filters = vec![is_in("id", " , ")];
    let rules = vec![when_eq("a", "1").then("x").alias("flag")];
    let options = BuildOptions::default();
    assert!(build_query("orders", &filters, &rules, options, Dialect::Postgres).is_err());
    assert!(
        build_query_parameterized("orders", &filters, &rules, options, Dialect::Postgres).is_err()
    );
}

#[test]
fn test_parameterized_numbers_in_text_order() {
    let filters = vec![gt("total", "100")];
    let rules = vec![when_eq("status", "open").then("Y").alias("is_open")];
    let options = BuildOptions {
        apply_filter_with_case: true,
        ..BuildOptions::default()
    };
    let result =
        build_query_parameterized("orders", &filters, &rules, options, Dialect::Postgres).unwrap();
    assert_eq!(
        result.sql,
        "WITH base AS (SELECT * FROM orders WHERE total > $1) SELECT *, CASE\n\
         WHEN status = $2 THEN $3\nEND AS is_open FROM base"
    );
    assert_eq!(result.params, vec!["100", "open", "Y"]);
}

#[test]
fn test_parameterized_dropped_filter_binds_nothing() {
    let filters = vec![gt("total", "100")];
    let rules = vec![when_eq("status", "open").then("Y").alias("is_open")];
    let options = BuildOptions::default();
    let result =
        build_query_parameterized("orders", &filters, &rules, options, Dialect::Sqlite).unwrap();
    assert_eq!(result.params, vec!["open", "Y"]);
    assert!(!result.sql.contains("WHERE"));
}

#[test]
fn test_quoted_identifiers_keep_mixed_case() {
    let filters = vec![eq("CustomerId", "7")];
    let rules = vec![when_eq("Status", "open").then("Y").alias("IsOpen")];
    let options = BuildOptions {
        apply_filter_with_case: true,
        quote_identifiers: true,
        ..BuildOptions::default()
    };
    let sql = build_query("Orders", &filters, &rules, options, Dialect::Postgres).unwrap();
    assert_eq!(
        sql,
        "WITH base AS (SELECT * FROM \"Orders\" WHERE \"CustomerId\" = '7') SELECT *, CASE\n\
         WHEN \"Status\" = 'open' THEN 'Y'\nEND AS \"IsOpen\" FROM base"
    );

    let sql = build_query("shop.Orders", &filters, &[], options, Dialect::MySql).unwrap();
    assert_eq!(sql, "SELECT * FROM `shop`.`Orders` WHERE `CustomerId` = '7'");
}
