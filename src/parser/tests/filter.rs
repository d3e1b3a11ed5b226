use pretty_assertions::assert_eq;

use crate::ast::{Combinator, FilterSpec, Operator};
use crate::error::ExtractError;
use crate::parser::{extend_filters, parse_filter, parse_filters};
use crate::transpiler::build_filter_sql;

#[test]
fn test_simple_comparison() {
    let (combinator, spec) = parse_filter("age > 30").unwrap();
    assert_eq!(combinator, None);
    assert_eq!(spec, FilterSpec::new("age", Operator::Gt, "30"));
}

#[test]
fn test_no_spaces_around_symbol() {
    let (_, spec) = parse_filter("age>=30").unwrap();
    assert_eq!(spec.op, Operator::Gte);
    assert_eq!(spec.value, "30");
}

#[test]
fn test_quoted_value_with_escaped_quote() {
    let (_, spec) = parse_filter("name = 'O''Brien Jr'").unwrap();
    assert_eq!(spec.value, "O'Brien Jr");
}

#[test]
fn test_between() {
    let (_, spec) = parse_filter("created between 2024-01-01 and '2024-12-31'").unwrap();
    assert_eq!(spec.op, Operator::Between);
    assert_eq!(spec.value, "2024-01-01");
    assert_eq!(spec.value2.as_deref(), Some("2024-12-31"));
}

#[test]
fn test_between_requires_and() {
    assert!(parse_filter("created BETWEEN 2024-01-01").is_err());
}

#[test]
fn test_in_list_forms() {
    let (_, bare) = parse_filter("id IN 1, 2,3").unwrap();
    assert_eq!(bare.value, "1, 2, 3");

    let (_, paren) = parse_filter("id IN ('a b', 'c''d', e)").unwrap();
    assert_eq!(paren.value, "a b, c'd, e");
    assert_eq!(
        build_filter_sql(&[paren]).unwrap(),
        "id IN ('a b', 'c''d', 'e')"
    );
}

#[test]
fn test_quoted_in_item_with_comma_rejected() {
    let err = parse_filter("id IN ('a b', 'c,d', e)").unwrap_err();
    assert!(matches!(&err, ExtractError::Parse(msg) if msg.contains("cannot contain ','")));
    assert!(parse_filter("id IN 'x,y'").is_err());
}

#[test]
fn test_like_and_not_equal_aliases() {
    let (_, spec) = parse_filter("name LIKE bob").unwrap();
    assert_eq!(spec.op, Operator::Like);
    let (_, spec) = parse_filter("status <> closed").unwrap();
    assert_eq!(spec.op, Operator::Ne);
}

#[test]
fn test_case_sensitive_mark() {
    let (_, spec) = parse_filter("name = Bob /cs").unwrap();
    assert!(spec.case_sensitive);
    assert_eq!(spec.value, "Bob");

    let (_, spec) = parse_filter("path = a/cs").unwrap();
    assert!(!spec.case_sensitive);
    assert_eq!(spec.value, "a/cs");
}

#[test]
fn test_column_starting_with_keyword() {
    let (combinator, spec) = parse_filter("order_id = 7").unwrap();
    assert_eq!(combinator, None);
    assert_eq!(spec.column, "order_id");
}

#[test]
fn test_leading_combinator_moves_to_previous() {
    let filters = parse_filters(&["age > 30", "OR status = active", "and name LIKE al"]).unwrap();
    assert_eq!(filters.len(), 3);
    assert_eq!(filters[0].combinator, Combinator::Or);
    assert_eq!(filters[1].combinator, Combinator::And);
    assert_eq!(
        build_filter_sql(&filters).unwrap(),
        "age > '30' OR status = 'active' AND name LIKE '%al%'"
    );
}

#[test]
fn test_extend_joins_existing_filters() {
    let mut filters = vec![FilterSpec::new("total", Operator::Gt, "100")];
    extend_filters(&mut filters, &["OR status = held", "region = EU"]).unwrap();
    assert_eq!(filters.len(), 3);
    assert_eq!(filters[0].combinator, Combinator::Or);
    assert_eq!(
        build_filter_sql(&filters).unwrap(),
        "total > '100' OR status = 'held' AND region = 'EU'"
    );

    let mut empty = Vec::new();
    assert!(extend_filters(&mut empty, &["OR status = held"]).is_err());
    assert!(empty.is_empty());
}

#[test]
fn test_first_filter_cannot_lead_with_combinator() {
    assert!(parse_filters(&["OR age > 30"]).is_err());
}

#[test]
fn test_garbage_rejected() {
    assert!(parse_filter("").is_err());
    assert!(parse_filter("age ~ 30").is_err());
    assert!(parse_filter("age > 30 extra").is_err());
    assert!(parse_filter("1age > 30").is_err());
}
